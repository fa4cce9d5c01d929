//! Color-keyed hit buffer for pointer picking.
//!
//! Every node and link is painted into an off-screen canvas in a unique
//! opaque color. The pixel under the pointer then names the object hovered.
//! Node hit areas use exactly the visual radius and are painted last so they
//! win over links they overlap.
//!
//! Keys carry a small checksum in their low bits: anti-aliased pixels blend
//! two keys into a third color, and the checksum rejects most of those.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::render::{Scene, Segment};
use super::simulation::Point;
use super::surface::Surface;
use super::theme::Style;
use super::types::NetworkNode;
use super::viewport::Viewport;
use crate::error::{NetworkError, Result};

const CHECKSUM_BITS: u32 = 6;
const CHECKSUM_MASK: u32 = (1 << CHECKSUM_BITS) - 1;
const MAX_KEY: u32 = (1 << (24 - CHECKSUM_BITS)) - 1;

/// What a hit-buffer pixel resolved to. Indices refer to the render graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
	Node(usize),
	Link(usize),
}

/// 24-bit key painted for one hit target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorKey(u32);

impl ColorKey {
	fn checksum(id: u32) -> u32 {
		id.wrapping_mul(0x9E37_79B1) >> (32 - CHECKSUM_BITS)
	}

	/// Key for the `id`th object; `id` 0 is reserved for "nothing".
	fn from_id(id: u32) -> Option<Self> {
		(1..=MAX_KEY)
			.contains(&id)
			.then(|| Self((id << CHECKSUM_BITS) | Self::checksum(id)))
	}

	/// Decodes an RGBA pixel. Translucent or corrupt pixels yield `None`.
	pub fn from_pixel([r, g, b, a]: [u8; 4]) -> Option<(Self, u32)> {
		if a != 255 {
			return None;
		}
		let raw = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
		let id = raw >> CHECKSUM_BITS;
		(id != 0 && raw & CHECKSUM_MASK == Self::checksum(id)).then_some((Self(raw), id))
	}

	pub fn to_css(self) -> String {
		format!("#{:06x}", self.0)
	}
}

/// Assigns keys for one render graph: nodes first, then links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitKeys {
	nodes: usize,
	links: usize,
}

impl HitKeys {
	pub fn new(nodes: usize, links: usize) -> Self {
		Self { nodes, links }
	}

	pub fn key(&self, target: HitTarget) -> Option<ColorKey> {
		let id = match target {
			HitTarget::Node(i) if i < self.nodes => i + 1,
			HitTarget::Link(i) if i < self.links => self.nodes + i + 1,
			_ => return None,
		};
		u32::try_from(id).ok().and_then(ColorKey::from_id)
	}

	pub fn resolve(&self, pixel: [u8; 4]) -> Option<HitTarget> {
		let (_, id) = ColorKey::from_pixel(pixel)?;
		let index = usize::try_from(id).ok()?.checked_sub(1)?;
		if index < self.nodes {
			Some(HitTarget::Node(index))
		} else if index - self.nodes < self.links {
			Some(HitTarget::Link(index - self.nodes))
		} else {
			None
		}
	}
}

/// Fills `node`'s hit area: a circle with exactly its visual radius.
pub fn paint_node_hit_area(
	node: &NetworkNode,
	at: Point,
	color: &str,
	style: &Style,
	surface: &mut dyn Surface,
) {
	surface.circle_path(at.x, at.y, style.node_radius(&node.kind));
	surface.set_fill_style(color);
	surface.fill();
}

/// Strokes a link's hit area, slightly wider than the drawn line.
pub fn paint_link_hit_area(segment: &Segment, color: &str, style: &Style, surface: &mut dyn Surface) {
	surface.begin_path();
	surface.move_to(segment.from.x, segment.from.y);
	surface.line_to(segment.to.x, segment.to.y);
	surface.set_stroke_style(color);
	surface.set_line_width(style.edge.width + style.link_hover_precision);
	surface.stroke();
}

/// Repaints the whole hit buffer for the current frame.
pub fn paint_hit_buffer(
	scene: &Scene<'_>,
	keys: &HitKeys,
	viewport: &Viewport,
	style: &Style,
	surface: &mut dyn Surface,
) {
	surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	surface.save();
	let center = viewport.center();
	surface.translate(center.x, center.y);

	for (i, link) in scene.graph.links.iter().enumerate() {
		let (Some(segment), Some(key)) = (scene.segment(link, style), keys.key(HitTarget::Link(i)))
		else {
			continue;
		};
		paint_link_hit_area(&segment, &key.to_css(), style, surface);
	}

	for (i, node) in scene.graph.nodes.iter().enumerate() {
		let (Some(at), Some(key)) = (scene.positions.get(&node.id), keys.key(HitTarget::Node(i)))
		else {
			continue;
		};
		paint_node_hit_area(node, at, &key.to_css(), style, surface);
	}

	surface.restore();
}

/// Off-screen canvas holding the hit buffer.
pub struct HitCanvas {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl HitCanvas {
	pub fn new(document: &Document, viewport: &Viewport) -> Result<Self> {
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")
			.map_err(|e| NetworkError::Canvas(format!("{e:?}")))?
			.dyn_into()
			.map_err(|_| NetworkError::Canvas("created element is not a canvas".into()))?;
		let ctx = context_2d(&canvas)?;
		let hit = Self { canvas, ctx };
		hit.resize(viewport);
		Ok(hit)
	}

	pub fn resize(&self, viewport: &Viewport) {
		self.canvas.set_width(viewport.width as u32);
		self.canvas.set_height(viewport.height as u32);
	}

	pub fn surface(&mut self) -> &mut CanvasRenderingContext2d {
		&mut self.ctx
	}

	/// RGBA of the pixel at canvas coordinates `(x, y)`.
	pub fn sample(&self, x: f64, y: f64) -> Option<[u8; 4]> {
		let data = self.ctx.get_image_data(x.floor(), y.floor(), 1.0, 1.0).ok()?;
		match data.data().as_slice() {
			[r, g, b, a, ..] => Some([*r, *g, *b, *a]),
			_ => None,
		}
	}
}

/// The 2D context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| NetworkError::Canvas(format!("{e:?}")))?
		.ok_or_else(|| NetworkError::Canvas("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| NetworkError::Canvas("unexpected context type".into()))
}
