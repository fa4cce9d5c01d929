//! View state combining projection, simulation, layout and hover tracking.
//!
//! Created once when the component mounts and mutated by the animation loop
//! and pointer handlers. Nothing here touches the DOM; the component feeds
//! in surfaces, hit-buffer samples and timings.

use std::sync::Arc;

use log::debug;

use super::adapter::{GraphProjector, RenderGraph};
use super::hit::{HitKeys, HitTarget, paint_hit_buffer};
use super::interaction::{InteractionController, Tooltip};
use super::layout::{ForceLayoutController, LayoutConfig};
use super::render::{Scene, render};
use super::simulation::Simulation;
use super::surface::Surface;
use super::theme::Style;
use super::types::NetworkGraph;
use super::viewport::Viewport;

/// Everything the canvas needs between frames.
pub struct NetworkView {
	pub style: Style,
	pub viewport: Viewport,
	projector: GraphProjector,
	graph: Arc<RenderGraph>,
	/// `None` until the canvas is mounted.
	simulation: Option<Simulation>,
	layout: ForceLayoutController,
	interaction: InteractionController,
	keys: HitKeys,
	hovered: Option<HitTarget>,
	/// Last pointer position, `None` while outside the container.
	pointer: Option<(f64, f64)>,
}

impl Default for NetworkView {
	fn default() -> Self {
		Self::new(Style::default(), LayoutConfig::default())
	}
}

impl NetworkView {
	pub fn new(style: Style, layout: LayoutConfig) -> Self {
		let interaction = InteractionController::new(style.tooltip_offset);
		Self {
			style,
			viewport: Viewport::default(),
			projector: GraphProjector::default(),
			graph: Arc::default(),
			simulation: None,
			layout: ForceLayoutController::new(layout),
			interaction,
			keys: HitKeys::default(),
			hovered: None,
			pointer: None,
		}
	}

	/// Brings up the simulation engine over whatever graph is current.
	pub fn attach_engine(&mut self) {
		if self.simulation.is_some() {
			return;
		}
		let mut simulation = Simulation::new();
		simulation.load(Arc::clone(&self.graph));
		self.simulation = Some(simulation);
	}

	/// Feeds a raw graph. Returns `true` if it produced a new projection,
	/// which restarts the simulation and drops any hover.
	pub fn set_graph(&mut self, raw: &Arc<NetworkGraph>) -> bool {
		let projected = self.projector.project(raw);
		if Arc::ptr_eq(&projected, &self.graph) {
			return false;
		}

		self.graph = projected;
		self.keys = HitKeys::new(self.graph.nodes.len(), self.graph.links.len());
		self.hovered = None;
		self.interaction.reset();
		if let Some(simulation) = &mut self.simulation {
			simulation.load(Arc::clone(&self.graph));
		}
		true
	}

	/// Advances one animation frame. Does nothing before the engine is
	/// attached.
	pub fn frame(&mut self, dt_ms: f64) {
		let Some(simulation) = &mut self.simulation else {
			return;
		};
		if let Err(err) = self.layout.ensure_configured(Some(&mut *simulation)) {
			debug!("network: layout deferred: {err}");
			return;
		}
		simulation.tick(dt_ms);
	}

	pub fn draw(&self, surface: &mut dyn Surface) {
		let Some(simulation) = &self.simulation else {
			return;
		};
		let scene = Scene::new(&self.graph, simulation.positions());
		render(&scene, &self.viewport, &self.style, surface);
	}

	pub fn paint_hits(&self, surface: &mut dyn Surface) {
		let Some(simulation) = &self.simulation else {
			return;
		};
		let scene = Scene::new(&self.graph, simulation.positions());
		paint_hit_buffer(&scene, &self.keys, &self.viewport, &self.style, surface);
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
		self.interaction.pointer_moved(x, y);
	}

	/// Pointer left the container: drops any hover.
	pub fn pointer_left(&mut self) -> bool {
		self.pointer = None;
		self.hover(None)
	}

	/// Whether nodes can still move under a resting pointer.
	pub fn layout_moving(&self) -> bool {
		self.simulation.as_ref().is_some_and(Simulation::is_running)
	}

	/// Resolves the hover under the last pointer position, reading the
	/// hit buffer through `sample`. Returns whether the tooltip may have
	/// changed.
	pub fn hover_at(&mut self, sample: impl FnOnce(f64, f64) -> Option<[u8; 4]>) -> bool {
		let Some((x, y)) = self.pointer else {
			return false;
		};
		let target = sample(x, y).and_then(|pixel| self.keys.resolve(pixel));
		self.hover(target)
	}

	/// Hit target for a hit-buffer pixel.
	pub fn resolve(&self, pixel: [u8; 4]) -> Option<HitTarget> {
		self.keys.resolve(pixel)
	}

	/// Updates the hovered object, emitting hover events only on change.
	/// Returns whether the tooltip may have changed.
	pub fn hover(&mut self, target: Option<HitTarget>) -> bool {
		if target == self.hovered {
			return false;
		}
		let previous = std::mem::replace(&mut self.hovered, target);

		match (previous, target) {
			(Some(HitTarget::Node(_)), Some(HitTarget::Node(_)))
			| (Some(HitTarget::Link(_)), Some(HitTarget::Link(_)))
			| (None, _) => {}
			(Some(HitTarget::Node(_)), _) => self.interaction.on_node_hover(None),
			(Some(HitTarget::Link(_)), _) => self.interaction.on_link_hover(None),
		}

		match target {
			Some(HitTarget::Node(i)) => self.interaction.on_node_hover(self.graph.nodes.get(i)),
			Some(HitTarget::Link(i)) => self.interaction.on_link_hover(self.graph.links.get(i)),
			None => {}
		}
		true
	}

	pub fn tooltip(&self) -> Option<Tooltip> {
		self.interaction.tooltip().cloned()
	}

	pub fn graph(&self) -> &Arc<RenderGraph> {
		&self.graph
	}

	pub fn simulation(&self) -> Option<&Simulation> {
		self.simulation.as_ref()
	}

	pub fn is_configured(&self) -> bool {
		self.layout.is_configured()
	}

	pub fn drag_enabled(&self) -> bool {
		self.simulation.as_ref().is_some_and(Simulation::drag_enabled)
	}
}
