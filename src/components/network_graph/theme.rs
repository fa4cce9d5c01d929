//! Visual styling for the transaction network.
//!
//! Sizes and colors here are part of the view's stable look; the palette
//! follows the dashboard's slate scheme with green/red for money flow.

use super::types::{Direction, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Uppercase `#RRGGBB` for opaque colors, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
/// Neutral gray for accounts and unknown node kinds.
pub const GRAY_500: Color = Color::rgb(0x6B, 0x72, 0x80);
pub const AMBER_500: Color = Color::rgb(0xF5, 0x9E, 0x0B);
pub const EMERALD_600: Color = Color::rgb(0x05, 0x96, 0x69);
pub const RED_600: Color = Color::rgb(0xDC, 0x26, 0x26);
pub const SLATE_400: Color = Color::rgb(0x94, 0xA3, 0xB8);
pub const SLATE_500: Color = Color::rgb(0x64, 0x74, 0x8B);
pub const SLATE_600: Color = Color::rgb(0x47, 0x55, 0x69);

/// Node circle and label styling.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub account_radius: f64,
	pub counterparty_radius: f64,
	pub default_radius: f64,
	pub account_color: Color,
	pub counterparty_color: Color,
	pub default_color: Color,
	pub border_color: Color,
	pub border_width: f64,
	pub label_color: Color,
	pub label_font: &'static str,
	/// Gap between the circle's bottom edge and the label's top.
	pub label_gap: f64,
	pub account_label_chars: usize,
	pub default_label_chars: usize,
}

/// Link line, arrowhead and amount pill styling.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub credit_color: Color,
	pub debit_color: Color,
	pub neutral_color: Color,
	pub width: f64,
	pub arrow_length: f64,
	/// Arrow tip position along the visible segment, 0.0 = source, 1.0 = target.
	pub arrow_position: f64,
	pub amount_font: &'static str,
	pub amount_font_size: f64,
	pub amount_color: Color,
	pub pill_color: Color,
	pub pill_padding_x: f64,
	pub pill_padding_y: f64,
	pub pill_radius: f64,
}

/// Complete visual configuration for the network view.
#[derive(Clone, Debug)]
pub struct Style {
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	/// Extra width around a link's hit area, so thin lines stay hoverable.
	pub link_hover_precision: f64,
	/// Tooltip anchor offset from the cursor.
	pub tooltip_offset: (f64, f64),
}

impl Default for Style {
	fn default() -> Self {
		Self {
			node: NodeStyle {
				account_radius: 16.0,
				counterparty_radius: 10.0,
				default_radius: 7.0,
				account_color: GRAY_500,
				counterparty_color: AMBER_500,
				default_color: GRAY_500,
				border_color: WHITE,
				border_width: 1.5,
				label_color: SLATE_600,
				label_font: "9px sans-serif",
				label_gap: 2.0,
				account_label_chars: 22,
				default_label_chars: 18,
			},
			edge: EdgeStyle {
				credit_color: EMERALD_600,
				debit_color: RED_600,
				neutral_color: SLATE_400,
				width: 2.5,
				arrow_length: 7.0,
				arrow_position: 0.85,
				amount_font: "8px sans-serif",
				amount_font_size: 8.0,
				amount_color: SLATE_500,
				pill_color: WHITE.with_alpha(0.85),
				pill_padding_x: 3.0,
				pill_padding_y: 2.0,
				pill_radius: 3.0,
			},
			link_hover_precision: 2.0,
			tooltip_offset: (14.0, -10.0),
		}
	}
}

impl Style {
	pub fn node_radius(&self, kind: &NodeKind) -> f64 {
		match kind {
			NodeKind::Account => self.node.account_radius,
			NodeKind::Counterparty => self.node.counterparty_radius,
			_ => self.node.default_radius,
		}
	}

	pub fn node_color(&self, kind: &NodeKind) -> Color {
		match kind {
			NodeKind::Account => self.node.account_color,
			NodeKind::Counterparty => self.node.counterparty_color,
			_ => self.node.default_color,
		}
	}

	pub fn label_chars(&self, kind: &NodeKind) -> usize {
		match kind {
			NodeKind::Account => self.node.account_label_chars,
			_ => self.node.default_label_chars,
		}
	}

	pub fn edge_color(&self, direction: &Direction) -> Color {
		match direction {
			Direction::Credit => self.edge.credit_color,
			Direction::Debit => self.edge.debit_color,
			_ => self.edge.neutral_color,
		}
	}
}
