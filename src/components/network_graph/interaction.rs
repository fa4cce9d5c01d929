//! Hover state machine driving the floating tooltip.
//!
//! Two external events move the machine: node hover and link hover, each
//! carrying the hovered object or `None` when the pointer left it. The
//! pointer position is tracked separately and only snapshotted when a hover
//! begins; the tooltip does not follow the cursor afterwards.

use super::format::{format_inr, humanize};
use super::types::{NetworkEdge, NetworkNode};

/// Tooltip contents and its anchor, relative to the graph container.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub lines: Vec<String>,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverState {
	#[default]
	Idle,
	HoveringNode {
		node_id: String,
		tooltip: Tooltip,
	},
	HoveringEdge {
		source: String,
		target: String,
		tooltip: Tooltip,
	},
}

/// Turns hover events into tooltip state.
#[derive(Clone, Debug)]
pub struct InteractionController {
	state: HoverState,
	pointer: (f64, f64),
	offset: (f64, f64),
}

impl Default for InteractionController {
	fn default() -> Self {
		Self::new((14.0, -10.0))
	}
}

impl InteractionController {
	/// `offset` is added to the cursor position to place the tooltip.
	pub fn new(offset: (f64, f64)) -> Self {
		Self {
			state: HoverState::Idle,
			pointer: (0.0, 0.0),
			offset,
		}
	}

	/// Records the latest cursor position. Does not move a visible tooltip.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = (x, y);
	}

	pub fn on_node_hover(&mut self, node: Option<&NetworkNode>) {
		self.state = match node {
			Some(node) => HoverState::HoveringNode {
				node_id: node.id.clone(),
				tooltip: self.snapshot(node_lines(node)),
			},
			None => HoverState::Idle,
		};
	}

	pub fn on_link_hover(&mut self, link: Option<&NetworkEdge>) {
		self.state = match link {
			Some(link) => HoverState::HoveringEdge {
				source: link.source.clone(),
				target: link.target.clone(),
				tooltip: self.snapshot(link_lines(link)),
			},
			None => HoverState::Idle,
		};
	}

	/// Drops any hover, e.g. when the graph is replaced.
	pub fn reset(&mut self) {
		self.state = HoverState::Idle;
	}

	pub fn state(&self) -> &HoverState {
		&self.state
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		match &self.state {
			HoverState::Idle => None,
			HoverState::HoveringNode { tooltip, .. } | HoverState::HoveringEdge { tooltip, .. } => {
				Some(tooltip)
			}
		}
	}

	fn snapshot(&self, lines: Vec<String>) -> Tooltip {
		Tooltip {
			lines,
			x: self.pointer.0 + self.offset.0,
			y: self.pointer.1 + self.offset.1,
		}
	}
}

/// Label, type, and risk when assessed.
pub fn node_lines(node: &NetworkNode) -> Vec<String> {
	let mut lines = vec![node.label.clone(), format!("Type: {}", node.kind)];
	if let Some(risk) = &node.risk {
		lines.push(format!("Risk: {risk}"));
	}
	lines
}

/// One line per populated field of the transaction.
pub fn link_lines(link: &NetworkEdge) -> Vec<String> {
	let mut lines = Vec::with_capacity(5);
	if !link.counterparty.is_empty() {
		lines.push(link.counterparty.clone());
	}
	if link.amount != 0.0 {
		lines.push(format!("Amount: {}", format_inr(link.amount)));
	}
	if !link.category.is_empty() {
		lines.push(format!("Type: {}", humanize(&link.category)));
	}
	if link.direction.is_present() {
		lines.push(format!("Direction: {}", link.direction));
	}
	if !link.date.is_empty() {
		lines.push(format!("Date: {}", link.date));
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::types::{Direction, NodeKind};

	fn account() -> NetworkNode {
		NetworkNode {
			id: "account:1".into(),
			label: "50100012345678".into(),
			kind: NodeKind::Account,
			risk: Some("high".into()),
		}
	}

	fn transfer() -> NetworkEdge {
		NetworkEdge {
			source: "account:1".into(),
			target: "counterparty:X".into(),
			amount: 2_800_000.0,
			category: "rtgs_transfer".into(),
			date: "2026-01-08".into(),
			direction: Direction::Debit,
			counterparty: "Shree Ornaments".into(),
		}
	}

	#[test]
	fn node_hover_shows_tooltip_at_offset_cursor() {
		let mut ctl = InteractionController::default();
		ctl.pointer_moved(100.0, 50.0);
		ctl.on_node_hover(Some(&account()));

		let tip = ctl.tooltip().unwrap();
		assert_eq!(tip.lines, ["50100012345678", "Type: account", "Risk: high"]);
		assert_eq!((tip.x, tip.y), (114.0, 40.0));
		assert!(matches!(ctl.state(), HoverState::HoveringNode { node_id, .. } if node_id == "account:1"));

		ctl.on_node_hover(None);
		assert_eq!(ctl.state(), &HoverState::Idle);
		assert!(ctl.tooltip().is_none());
	}

	#[test]
	fn node_without_risk_has_two_lines() {
		let mut node = account();
		node.risk = None;
		assert_eq!(node_lines(&node), ["50100012345678", "Type: account"]);
	}

	#[test]
	fn tooltip_position_is_fixed_for_the_hover() {
		let mut ctl = InteractionController::default();
		ctl.pointer_moved(10.0, 10.0);
		ctl.on_node_hover(Some(&account()));
		ctl.pointer_moved(300.0, 200.0);

		let tip = ctl.tooltip().unwrap();
		assert_eq!((tip.x, tip.y), (24.0, 0.0));

		// The next hover picks up the fresh position.
		ctl.on_node_hover(None);
		ctl.on_link_hover(Some(&transfer()));
		let tip = ctl.tooltip().unwrap();
		assert_eq!((tip.x, tip.y), (314.0, 190.0));
	}

	#[test]
	fn link_hover_lists_transaction_details() {
		let mut ctl = InteractionController::default();
		ctl.on_link_hover(Some(&transfer()));

		assert_eq!(
			ctl.tooltip().unwrap().lines,
			[
				"Shree Ornaments",
				"Amount: ₹28,00,000",
				"Type: rtgs transfer",
				"Direction: debit",
				"Date: 2026-01-08",
			]
		);

		ctl.on_link_hover(None);
		assert!(ctl.tooltip().is_none());
	}

	#[test]
	fn empty_link_fields_are_omitted() {
		let link = NetworkEdge {
			amount: 0.0,
			counterparty: String::new(),
			direction: Direction::Unknown,
			date: String::new(),
			..transfer()
		};
		assert_eq!(link_lines(&link), ["Type: rtgs transfer"]);
	}

	#[test]
	fn null_hover_of_either_kind_returns_to_idle() {
		let mut ctl = InteractionController::default();
		ctl.on_link_hover(Some(&transfer()));
		ctl.on_node_hover(None);
		assert_eq!(ctl.state(), &HoverState::Idle);

		ctl.on_node_hover(Some(&account()));
		ctl.on_link_hover(None);
		assert_eq!(ctl.state(), &HoverState::Idle);
	}

	#[test]
	fn reset_clears_hover() {
		let mut ctl = InteractionController::default();
		ctl.on_node_hover(Some(&account()));
		ctl.reset();
		assert!(ctl.tooltip().is_none());
	}
}
