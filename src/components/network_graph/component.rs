//! Leptos component hosting the transaction network canvas.
//!
//! The canvas is created once and kept for the component's lifetime; data
//! changes flow into [`NetworkView::set_graph`], which only restarts the
//! simulation when the projection actually changed. An animation loop runs
//! via `requestAnimationFrame`, ticking the simulation and redrawing both the
//! visible canvas and the off-screen hit buffer each frame. Unmounting
//! cancels the pending frame and releases the loop and both canvases.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::hit::{HitCanvas, context_2d};
use super::interaction::Tooltip;
use super::state::NetworkView;
use super::viewport::Viewport;
use crate::error::{NetworkError, Result};
use crate::source::GraphLoad;

/// Drawing targets that exist once the canvas is mounted.
struct Surfaces {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	hit: HitCanvas,
}

impl Surfaces {
	fn mount(canvas: HtmlCanvasElement, viewport: &Viewport) -> Result<Self> {
		let document = canvas
			.owner_document()
			.ok_or_else(|| NetworkError::Canvas("canvas has no document".into()))?;
		let ctx = context_2d(&canvas)?;
		let hit = HitCanvas::new(&document, viewport)?;
		let surfaces = Self { canvas, ctx, hit };
		surfaces.resize(viewport);
		Ok(surfaces)
	}

	fn resize(&self, viewport: &Viewport) {
		self.canvas.set_width(viewport.width as u32);
		self.canvas.set_height(viewport.height as u32);
		self.hit.resize(viewport);
	}
}

/// Self-rescheduling `requestAnimationFrame` callback.
///
/// The callback reaches its loop through a `Weak`, so [`FrameLoop::stop`]
/// releases everything the callback captured.
struct FrameLoop<F = Closure<dyn FnMut()>> {
	callback: RefCell<Option<F>>,
	/// Id of the next scheduled frame.
	pending: Cell<Option<i32>>,
}

impl<F> Default for FrameLoop<F> {
	fn default() -> Self {
		Self {
			callback: RefCell::new(None),
			pending: Cell::new(None),
		}
	}
}

impl<F> FrameLoop<F> {
	fn start(&self, callback: F) {
		*self.callback.borrow_mut() = Some(callback);
	}

	/// Drops the callback, returning the id of a frame still scheduled.
	fn stop(&self) -> Option<i32> {
		self.callback.borrow_mut().take();
		self.pending.take()
	}
}

impl FrameLoop {
	fn schedule(&self) {
		let id = web_sys::window().and_then(|window| {
			let callback = self.callback.borrow();
			window
				.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
				.ok()
		});
		self.pending.set(id);
	}

	fn cancel(&self) {
		if let (Some(id), Some(window)) = (self.stop(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

/// View state plus the surfaces it draws into.
struct GraphContext {
	view: NetworkView,
	surfaces: Option<Surfaces>,
}

/// Renders an alert's transaction network with hover tooltips.
///
/// `graph` carries the data-fetch state. The canvas only shows for
/// `Ready(Some(_))`; loading and failure states render a status line instead.
#[component]
pub fn TransactionNetwork(#[prop(into)] graph: Signal<GraphLoad>) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip = RwSignal::new(None::<Tooltip>);

	let context = Rc::new(RefCell::new(GraphContext {
		view: NetworkView::default(),
		surfaces: None,
	}));
	let frames: Rc<FrameLoop> = Rc::default();

	let context_data = context.clone();
	Effect::new(move |_| {
		if let GraphLoad::Ready(Some(raw)) = graph.get() {
			if context_data.borrow_mut().view.set_graph(&raw) {
				tooltip.set(None);
			}
		}
	});

	let (context_init, frames_init) = (context.clone(), frames.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if context_init.borrow().surfaces.is_some() {
			return;
		}

		let viewport = Viewport::measure(canvas.parent_element().as_ref());
		let surfaces = match Surfaces::mount(canvas, &viewport) {
			Ok(surfaces) => surfaces,
			Err(err) => {
				warn!("network: {err}");
				return;
			}
		};
		{
			let mut c = context_init.borrow_mut();
			c.view.viewport = viewport;
			c.view.attach_engine();
			c.surfaces = Some(surfaces);
		}
		info!("network: canvas mounted at {}x{}", viewport.width, viewport.height);

		let (context_anim, frames_anim) = (context_init.clone(), Rc::downgrade(&frames_init));
		let mut last = js_sys::Date::now();
		frames_init.start(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = now - last;
			last = now;

			{
				let mut c = context_anim.borrow_mut();
				let GraphContext { view, surfaces } = &mut *c;
				let moving = view.layout_moving();
				view.frame(dt);
				if let Some(s) = surfaces {
					view.draw(&mut s.ctx);
					view.paint_hits(s.hit.surface());
					// Nodes slide under a resting pointer while settling.
					if moving && view.hover_at(|x, y| s.hit.sample(x, y)) {
						tooltip.set(view.tooltip());
					}
				}
			}

			if let Some(frames) = frames_anim.upgrade() {
				frames.schedule();
			}
		}));
		frames_init.schedule();
	});

	let context_resize = context.clone();
	let resize = window_event_listener(ev::resize, move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let viewport = Viewport::measure(Some(&container));
		let mut c = context_resize.borrow_mut();
		c.view.viewport = viewport;
		if let Some(s) = &c.surfaces {
			s.resize(&viewport);
		}
	});
	let teardown = StoredValue::new_local((frames, context.clone()));
	on_cleanup(move || {
		teardown.with_value(|(frames, context)| {
			frames.cancel();
			context.borrow_mut().surfaces = None;
		});
		resize.remove();
		info!("network: canvas released");
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let rect = container.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let mut c = context_mm.borrow_mut();
		let GraphContext { view, surfaces } = &mut *c;
		view.pointer_moved(x, y);
		if view.hover_at(|x, y| surfaces.as_ref().and_then(|s| s.hit.sample(x, y))) {
			tooltip.set(view.tooltip());
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if context_ml.borrow_mut().view.pointer_left() {
			tooltip.set(None);
		}
	};

	let ready = move || matches!(graph.get(), GraphLoad::Ready(Some(_)));

	view! {
		<div
			node_ref=container_ref
			class="transaction-network"
			style="position: relative; width: 100%;"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
		>
			{move || match graph.get() {
				GraphLoad::Loading => {
					view! { <p class="network-status">"Loading network…"</p> }.into_any()
				}
				GraphLoad::Failed(message) => {
					view! { <div class="network-error" role="alert">{message}</div> }.into_any()
				}
				GraphLoad::Ready(_) => ().into_any(),
			}}
			<canvas
				node_ref=canvas_ref
				class="network-canvas"
				style:display=move || if ready() { "block" } else { "none" }
			/>
			{move || {
				tooltip
					.get()
					.map(|tip| {
						view! {
							<div
								class="network-tooltip"
								style:position="absolute"
								style:pointer-events="none"
								style:left=format!("{}px", tip.x)
								style:top=format!("{}px", tip.y)
							>
								{tip.lines.into_iter().map(|line| view! { <div>{line}</div> }).collect_view()}
							</div>
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stopping_the_loop_releases_its_captures() {
		let frames: Rc<FrameLoop<Box<dyn FnMut()>>> = Rc::default();
		let context = Rc::new(RefCell::new(0_u32));
		let (held, weak) = (context.clone(), Rc::downgrade(&frames));
		frames.start(Box::new(move || {
			*held.borrow_mut() += 1;
			let _ = weak.upgrade();
		}));
		frames.pending.set(Some(7));

		// The callback does not keep its own loop alive.
		assert_eq!(Rc::strong_count(&frames), 1);
		assert_eq!(Rc::strong_count(&context), 2);

		assert_eq!(frames.stop(), Some(7));
		assert_eq!(Rc::strong_count(&context), 1);
		assert_eq!(frames.stop(), None);
	}

	#[test]
	fn callback_runs_until_stopped() {
		let frames: FrameLoop<Box<dyn FnMut()>> = FrameLoop::default();
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		frames.start(Box::new(move || seen.set(seen.get() + 1)));

		let run = |frames: &FrameLoop<Box<dyn FnMut()>>| {
			if let Some(callback) = frames.callback.borrow_mut().as_mut() {
				callback();
			}
		};
		run(&frames);
		run(&frames);
		frames.stop();
		run(&frames);
		assert_eq!(count.get(), 2);
	}
}
