//! Per-frame drawing of the transaction network.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Links: direction-colored lines with arrowheads
//! 2. Nodes: filled circle, white border, truncated label below
//! 3. Amount pills at link midpoints, above everything else

use std::collections::HashMap;

use super::adapter::RenderGraph;
use super::format::{format_inr, truncate_label};
use super::simulation::{Point, Positions};
use super::surface::Surface;
use super::theme::Style;
use super::types::{NetworkEdge, NetworkNode};
use super::viewport::Viewport;

/// Width-to-height ratio of an arrowhead.
const ARROW_WH_RATIO: f64 = 1.6;

/// A link's endpoints resolved against the current positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub from: Point,
	pub to: Point,
	pub from_radius: f64,
	pub to_radius: f64,
}

impl Segment {
	pub fn length(&self) -> f64 {
		(self.to.x - self.from.x).hypot(self.to.y - self.from.y)
	}

	pub fn midpoint(&self) -> Point {
		self.from.midpoint(self.to)
	}
}

/// Read-only view over one frame's graph and positions.
pub struct Scene<'a> {
	pub graph: &'a RenderGraph,
	pub positions: &'a Positions,
	by_id: HashMap<&'a str, &'a NetworkNode>,
}

impl<'a> Scene<'a> {
	pub fn new(graph: &'a RenderGraph, positions: &'a Positions) -> Self {
		let by_id = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		Self {
			graph,
			positions,
			by_id,
		}
	}

	/// `None` when either endpoint has no position yet.
	pub fn segment(&self, link: &NetworkEdge, style: &Style) -> Option<Segment> {
		let from = self.positions.get(&link.source)?;
		let to = self.positions.get(&link.target)?;
		let radius = |id: &str| {
			self.by_id
				.get(id)
				.map_or(style.node.default_radius, |n| style.node_radius(&n.kind))
		};
		Some(Segment {
			from,
			to,
			from_radius: radius(&link.source),
			to_radius: radius(&link.target),
		})
	}
}

/// Renders a complete frame: clears, centers the graph origin, then draws
/// links, nodes and amount labels.
pub fn render(scene: &Scene<'_>, viewport: &Viewport, style: &Style, surface: &mut dyn Surface) {
	surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	surface.save();
	let center = viewport.center();
	surface.translate(center.x, center.y);

	for link in &scene.graph.links {
		if let Some(segment) = scene.segment(link, style) {
			draw_link(link, &segment, style, surface);
		}
	}

	for node in &scene.graph.nodes {
		if let Some(at) = scene.positions.get(&node.id) {
			draw_node(node, at, style, surface);
		}
	}

	for link in &scene.graph.links {
		draw_edge_label(link, scene.segment(link, style), style, surface);
	}

	surface.restore();
}

/// Filled circle with a white border and the truncated label underneath.
pub fn draw_node(node: &NetworkNode, at: Point, style: &Style, surface: &mut dyn Surface) {
	let radius = style.node_radius(&node.kind);

	surface.circle_path(at.x, at.y, radius);
	surface.set_fill_style(&style.node_color(&node.kind).to_css());
	surface.fill();
	surface.set_stroke_style(&style.node.border_color.to_css());
	surface.set_line_width(style.node.border_width);
	surface.stroke();

	let label = truncate_label(&node.label, style.label_chars(&node.kind));
	surface.set_font(style.node.label_font);
	surface.set_text_align("center");
	surface.set_text_baseline("top");
	surface.set_fill_style(&style.node.label_color.to_css());
	surface.fill_text(&label, at.x, at.y + radius + style.node.label_gap);
}

/// Direction-colored line from center to center, with an arrowhead near the
/// target.
pub fn draw_link(link: &NetworkEdge, segment: &Segment, style: &Style, surface: &mut dyn Surface) {
	let color = style.edge_color(&link.direction).to_css();

	surface.begin_path();
	surface.move_to(segment.from.x, segment.from.y);
	surface.line_to(segment.to.x, segment.to.y);
	surface.set_stroke_style(&color);
	surface.set_line_width(style.edge.width);
	surface.stroke();

	if let Some([tip, left, right]) = arrowhead(segment, style) {
		surface.begin_path();
		surface.move_to(tip.x, tip.y);
		surface.line_to(left.x, left.y);
		surface.line_to(right.x, right.y);
		surface.close_path();
		surface.set_fill_style(&color);
		surface.fill();
	}
}

/// Arrowhead triangle `[tip, left, right]`, placed along the part of the
/// segment not covered by either node. `None` for degenerate segments.
pub fn arrowhead(segment: &Segment, style: &Style) -> Option<[Point; 3]> {
	let len = segment.length();
	if len < 0.001 {
		return None;
	}
	let arrow = style.edge.arrow_length;
	let (ux, uy) = (
		(segment.to.x - segment.from.x) / len,
		(segment.to.y - segment.from.y) / len,
	);

	let span = len - segment.from_radius - segment.to_radius - arrow;
	let along = segment.from_radius + arrow + span * style.edge.arrow_position;
	let tip = Point::new(segment.from.x + ux * along, segment.from.y + uy * along);
	let back = Point::new(tip.x - ux * arrow, tip.y - uy * arrow);
	let half = arrow / ARROW_WH_RATIO / 2.0;
	let (px, py) = (-uy * half, ux * half);

	Some([
		tip,
		Point::new(back.x + px, back.y + py),
		Point::new(back.x - px, back.y - py),
	])
}

/// Formatted amount on a rounded pill at the link midpoint. Draws nothing
/// for zero amounts or unresolved endpoints.
pub fn draw_edge_label(
	link: &NetworkEdge,
	segment: Option<Segment>,
	style: &Style,
	surface: &mut dyn Surface,
) {
	let Some(segment) = segment else {
		return;
	};
	if link.amount == 0.0 {
		return;
	}

	let mid = segment.midpoint();
	let text = format_inr(link.amount);
	let edge = &style.edge;

	surface.set_font(edge.amount_font);
	let text_width = surface.measure_text(&text);
	let (w, h) = (
		text_width + edge.pill_padding_x * 2.0,
		edge.amount_font_size + edge.pill_padding_y * 2.0,
	);

	surface.rounded_rect_path(mid.x - w / 2.0, mid.y - h / 2.0, w, h, edge.pill_radius);
	surface.set_fill_style(&edge.pill_color.to_css());
	surface.fill();

	surface.set_text_align("center");
	surface.set_text_baseline("middle");
	surface.set_fill_style(&edge.amount_color.to_css());
	surface.fill_text(&text, mid.x, mid.y);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::surface::recording::{GLYPH_WIDTH, Op, RecordingSurface};
	use crate::components::network_graph::types::{Direction, NodeKind};

	fn node(id: &str, kind: NodeKind, label: &str) -> NetworkNode {
		NetworkNode {
			id: id.into(),
			label: label.into(),
			kind,
			risk: None,
		}
	}

	fn link(source: &str, target: &str, amount: f64, direction: Direction) -> NetworkEdge {
		NetworkEdge {
			source: source.into(),
			target: target.into(),
			amount,
			category: "imps_transfer".into(),
			date: "2026-01-14".into(),
			direction,
			counterparty: "Bharat Gems".into(),
		}
	}

	fn segment() -> Segment {
		Segment {
			from: Point::new(0.0, 0.0),
			to: Point::new(100.0, 0.0),
			from_radius: 16.0,
			to_radius: 10.0,
		}
	}

	#[test]
	fn account_node_draws_large_gray_circle_and_long_label() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();
		let account = node(
			"a1",
			NodeKind::Account,
			"ACCT-0001-2222-3333-4444-5555",
		);

		draw_node(&account, Point::new(5.0, 5.0), &style, &mut surface);

		assert_eq!(surface.arcs(), [(5.0, 5.0, 16.0)]);
		assert_eq!(surface.fill_styles(), ["#6B7280", "#475569"]);
		assert_eq!(surface.stroke_styles(), ["#FFFFFF"]);
		assert_eq!(surface.count(&Op::LineWidth(1.5)), 1);
		assert_eq!(surface.texts(), ["ACCT-0001-2222-3333-44…"]);
		assert!(surface.ops.contains(&Op::Font("9px sans-serif".into())));
		assert!(surface.ops.contains(&Op::TextAlign("center".into())));
	}

	#[test]
	fn counterparty_node_is_amber_with_short_label() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();
		let cp = node("cp", NodeKind::Counterparty, "Shree Ornaments Private Limited");

		draw_node(&cp, Point::default(), &style, &mut surface);

		assert_eq!(surface.arcs(), [(0.0, 0.0, 10.0)]);
		assert_eq!(surface.fill_styles()[0], "#F59E0B");
		assert_eq!(surface.texts(), ["Shree Ornaments Pr…"]);
	}

	#[test]
	fn unknown_kind_falls_back_to_defaults() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();
		let odd = node("x", NodeKind::Other("unknown-future-type".into()), "X");

		draw_node(&odd, Point::default(), &style, &mut surface);

		assert_eq!(surface.arcs(), [(0.0, 0.0, 7.0)]);
		assert_eq!(surface.fill_styles()[0], "#6B7280");
		// Label sits below the circle.
		assert!(matches!(
			surface.ops.last(),
			Some(Op::Text { y, .. }) if *y == 7.0 + style.node.label_gap
		));
	}

	#[test]
	fn link_color_follows_direction() {
		let style = Style::default();
		for (direction, css) in [
			(Direction::Credit, "#059669"),
			(Direction::Debit, "#DC2626"),
			(Direction::Internal, "#94A3B8"),
		] {
			let mut surface = RecordingSurface::default();
			draw_link(&link("a", "b", 10.0, direction), &segment(), &style, &mut surface);
			assert_eq!(surface.stroke_styles(), [css]);
			// Arrowhead shares the line color.
			assert_eq!(surface.fill_styles(), [css]);
			assert!(surface.ops.contains(&Op::LineWidth(2.5)));
		}
	}

	#[test]
	fn arrowhead_sits_at_85_percent_of_visible_span() {
		let style = Style::default();
		let [tip, left, right] = arrowhead(&segment(), &style).unwrap();

		// visible span: 100 - 16 - 10 - 7 = 67; tip at 16 + 7 + 0.85 * 67
		assert!((tip.x - 79.95).abs() < 1e-9);
		assert_eq!(tip.y, 0.0);
		assert!((left.x - 72.95).abs() < 1e-9);
		assert!(((left.y - right.y).abs() - 7.0 / 1.6).abs() < 1e-9);
	}

	#[test]
	fn degenerate_segment_has_no_arrowhead() {
		let style = Style::default();
		let mut seg = segment();
		seg.to = seg.from;
		assert!(arrowhead(&seg, &style).is_none());
	}

	#[test]
	fn amount_pill_is_centered_on_midpoint() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();

		draw_edge_label(
			&link("a", "b", 200_000.0, Direction::Debit),
			Some(segment()),
			&style,
			&mut surface,
		);

		assert_eq!(
			surface.ops.iter().find(|op| matches!(op, Op::Text { .. })),
			Some(&Op::Text {
				text: "₹2,00,000".into(),
				x: 50.0,
				y: 0.0
			})
		);
		assert_eq!(surface.fill_styles(), ["rgba(255, 255, 255, 0.85)", "#64748B"]);
		assert!(surface.ops.contains(&Op::Font("8px sans-serif".into())));

		// Pill spans the measured text plus padding.
		let text_width = "₹2,00,000".chars().count() as f64 * GLYPH_WIDTH;
		let left = 50.0 - (text_width + 6.0) / 2.0;
		assert!(surface.ops.contains(&Op::MoveTo(left + 3.0, -6.0)));
	}

	#[test]
	fn zero_amount_draws_no_label() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();
		draw_edge_label(
			&link("a", "b", 0.0, Direction::Credit),
			Some(segment()),
			&style,
			&mut surface,
		);
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn unresolved_endpoints_draw_no_label() {
		let style = Style::default();
		let mut surface = RecordingSurface::default();
		draw_edge_label(&link("a", "b", 10.0, Direction::Credit), None, &style, &mut surface);
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn zero_amount_link_still_draws_green_line() {
		let style = Style::default();
		let graph = RenderGraph {
			nodes: vec![
				node("a", NodeKind::Account, "A"),
				node("b", NodeKind::Counterparty, "B"),
			],
			links: vec![link("a", "b", 0.0, Direction::Credit)],
		};
		let positions = Positions::from_points([
			("a", Point::new(-50.0, 0.0)),
			("b", Point::new(50.0, 0.0)),
		]);
		let scene = Scene::new(&graph, &positions);
		let mut surface = RecordingSurface::default();

		render(&scene, &Viewport::new(800.0), &style, &mut surface);

		assert_eq!(surface.stroke_styles()[0], "#059669");
		assert_eq!(surface.texts(), ["A", "B"]);
		assert_eq!(surface.ops[1], Op::Save);
		assert_eq!(surface.ops[2], Op::Translate(400.0, 260.0));
		assert_eq!(surface.ops.last(), Some(&Op::Restore));
	}

	#[test]
	fn labels_are_drawn_after_nodes() {
		let style = Style::default();
		let graph = RenderGraph {
			nodes: vec![
				node("a", NodeKind::Account, "A"),
				node("b", NodeKind::Counterparty, "B"),
			],
			links: vec![link("a", "b", 500.0, Direction::Debit)],
		};
		let positions =
			Positions::from_points([("a", Point::new(0.0, 0.0)), ("b", Point::new(90.0, 0.0))]);
		let scene = Scene::new(&graph, &positions);
		let mut surface = RecordingSurface::default();

		render(&scene, &Viewport::new(800.0), &style, &mut surface);

		assert_eq!(surface.texts(), ["A", "B", "₹500"]);
	}
}
