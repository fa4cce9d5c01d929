//! Drawing surface abstraction.
//!
//! Renderer and hit-tester draw through [`Surface`] instead of talking to the
//! canvas directly, so the same routines paint the visible canvas, the
//! off-screen hit buffer, and the recording surface used in tests.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// The subset of a 2D canvas context the network view draws with.
pub trait Surface {
	fn set_fill_style(&mut self, css: &str);
	fn set_stroke_style(&mut self, css: &str);
	fn set_line_width(&mut self, width: f64);
	fn set_font(&mut self, font: &str);
	fn set_text_align(&mut self, align: &str);
	fn set_text_baseline(&mut self, baseline: &str);

	fn begin_path(&mut self);
	fn close_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn fill(&mut self);
	fn stroke(&mut self);

	fn fill_text(&mut self, text: &str, x: f64, y: f64);
	/// Width of `text` in the current font.
	fn measure_text(&mut self, text: &str) -> f64;

	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

	/// Starts a new path holding a full circle.
	fn circle_path(&mut self, x: f64, y: f64, radius: f64) {
		self.begin_path();
		self.arc(x, y, radius, 0.0, TAU);
	}

	/// Starts a new path holding a rectangle with rounded corners.
	fn rounded_rect_path(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
		let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
		let (right, bottom) = (x + width, y + height);
		self.begin_path();
		self.move_to(x + r, y);
		self.line_to(right - r, y);
		self.quadratic_curve_to(right, y, right, y + r);
		self.line_to(right, bottom - r);
		self.quadratic_curve_to(right, bottom, right - r, bottom);
		self.line_to(x + r, bottom);
		self.quadratic_curve_to(x, bottom, x, bottom - r);
		self.line_to(x, y + r);
		self.quadratic_curve_to(x, y, x + r, y);
		self.close_path();
	}
}

impl Surface for CanvasRenderingContext2d {
	fn set_fill_style(&mut self, css: &str) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_fill_style_str(css);
	}

	fn set_stroke_style(&mut self, css: &str) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_stroke_style_str(css);
	}

	fn set_line_width(&mut self, width: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_line_width(width);
	}

	fn set_font(&mut self, font: &str) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_font(font);
	}

	fn set_text_align(&mut self, align: &str) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_text_align(align);
	}

	fn set_text_baseline(&mut self, baseline: &str) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.set_text_baseline(baseline);
	}

	fn begin_path(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.begin_path();
	}

	fn close_path(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.close_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.line_to(x, y);
	}

	fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.quadratic_curve_to(cpx, cpy, x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		// Only fails for a negative radius.
		let _ = ctx.arc(x, y, radius, start, end);
	}

	fn fill(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.fill();
	}

	fn stroke(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.stroke();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		let _ = ctx.fill_text(text, x, y);
	}

	fn measure_text(&mut self, text: &str) -> f64 {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
	}

	fn save(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.save();
	}

	fn restore(&mut self) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.restore();
	}

	fn translate(&mut self, x: f64, y: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		let _ = ctx.translate(x, y);
	}

	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		let ctx: &CanvasRenderingContext2d = self;
		ctx.clear_rect(x, y, width, height);
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory [`Surface`] that records every call.

	use super::Surface;

	/// Pretend every glyph is this wide.
	pub const GLYPH_WIDTH: f64 = 5.0;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		FillStyle(String),
		StrokeStyle(String),
		LineWidth(f64),
		Font(String),
		TextAlign(String),
		TextBaseline(String),
		BeginPath,
		ClosePath,
		MoveTo(f64, f64),
		LineTo(f64, f64),
		Curve(f64, f64, f64, f64),
		Arc { x: f64, y: f64, r: f64 },
		Fill,
		Stroke,
		Text { text: String, x: f64, y: f64 },
		Save,
		Restore,
		Translate(f64, f64),
		Clear,
	}

	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub ops: Vec<Op>,
	}

	impl RecordingSurface {
		pub fn texts(&self) -> Vec<&str> {
			self.ops
				.iter()
				.filter_map(|op| match op {
					Op::Text { text, .. } => Some(text.as_str()),
					_ => None,
				})
				.collect()
		}

		pub fn arcs(&self) -> Vec<(f64, f64, f64)> {
			self.ops
				.iter()
				.filter_map(|op| match op {
					Op::Arc { x, y, r } => Some((*x, *y, *r)),
					_ => None,
				})
				.collect()
		}

		pub fn fill_styles(&self) -> Vec<&str> {
			self.ops
				.iter()
				.filter_map(|op| match op {
					Op::FillStyle(css) => Some(css.as_str()),
					_ => None,
				})
				.collect()
		}

		pub fn stroke_styles(&self) -> Vec<&str> {
			self.ops
				.iter()
				.filter_map(|op| match op {
					Op::StrokeStyle(css) => Some(css.as_str()),
					_ => None,
				})
				.collect()
		}

		pub fn count(&self, wanted: &Op) -> usize {
			self.ops.iter().filter(|op| *op == wanted).count()
		}
	}

	impl Surface for RecordingSurface {
		fn set_fill_style(&mut self, css: &str) {
			self.ops.push(Op::FillStyle(css.into()));
		}
		fn set_stroke_style(&mut self, css: &str) {
			self.ops.push(Op::StrokeStyle(css.into()));
		}
		fn set_line_width(&mut self, width: f64) {
			self.ops.push(Op::LineWidth(width));
		}
		fn set_font(&mut self, font: &str) {
			self.ops.push(Op::Font(font.into()));
		}
		fn set_text_align(&mut self, align: &str) {
			self.ops.push(Op::TextAlign(align.into()));
		}
		fn set_text_baseline(&mut self, baseline: &str) {
			self.ops.push(Op::TextBaseline(baseline.into()));
		}
		fn begin_path(&mut self) {
			self.ops.push(Op::BeginPath);
		}
		fn close_path(&mut self) {
			self.ops.push(Op::ClosePath);
		}
		fn move_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::MoveTo(x, y));
		}
		fn line_to(&mut self, x: f64, y: f64) {
			self.ops.push(Op::LineTo(x, y));
		}
		fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
			self.ops.push(Op::Curve(cpx, cpy, x, y));
		}
		fn arc(&mut self, x: f64, y: f64, r: f64, _start: f64, _end: f64) {
			self.ops.push(Op::Arc { x, y, r });
		}
		fn fill(&mut self) {
			self.ops.push(Op::Fill);
		}
		fn stroke(&mut self) {
			self.ops.push(Op::Stroke);
		}
		fn fill_text(&mut self, text: &str, x: f64, y: f64) {
			self.ops.push(Op::Text {
				text: text.into(),
				x,
				y,
			});
		}
		fn measure_text(&mut self, text: &str) -> f64 {
			text.chars().count() as f64 * GLYPH_WIDTH
		}
		fn save(&mut self) {
			self.ops.push(Op::Save);
		}
		fn restore(&mut self) {
			self.ops.push(Op::Restore);
		}
		fn translate(&mut self, x: f64, y: f64) {
			self.ops.push(Op::Translate(x, y));
		}
		fn clear_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {
			self.ops.push(Op::Clear);
		}
	}
}
