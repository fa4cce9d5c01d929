//! Render dimensions of the network view.
//!
//! Width follows the host container and is re-measured on window resize;
//! height is fixed.

use web_sys::Element;

use super::simulation::Point;

/// Fixed canvas height in CSS pixels.
pub const GRAPH_HEIGHT: f64 = 520.0;

/// Width used until the container has been laid out.
pub const FALLBACK_WIDTH: f64 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(FALLBACK_WIDTH)
	}
}

impl Viewport {
	pub fn new(width: f64) -> Self {
		Self {
			width,
			height: GRAPH_HEIGHT,
		}
	}

	/// Builds a viewport from a measured width, falling back when the
	/// measurement is missing or zero (container not laid out yet).
	pub fn from_measurement(width: Option<f64>) -> Self {
		let width = width
			.filter(|w| w.is_finite() && *w > 0.0)
			.unwrap_or(FALLBACK_WIDTH);
		Self::new(width)
	}

	/// Measures `container`'s rendered width.
	pub fn measure(container: Option<&Element>) -> Self {
		Self::from_measurement(container.map(|el| el.client_width() as f64))
	}

	/// Screen position of the graph-space origin.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}
