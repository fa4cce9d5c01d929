//! Physics simulation host.
//!
//! Wraps the `force_graph` engine with d3-style cooling (alpha decay and a
//! cooldown budget) and publishes node positions into a [`Positions`] table.
//! The simulation is the only writer of that table; renderer and hit-tester
//! receive it by shared reference.

use std::collections::HashMap;
use std::sync::Arc;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::adapter::RenderGraph;
use super::layout::{LayoutConfig, SimulationHandle};

/// Engine time step per tick, in seconds. Layout progress is counted in
/// ticks; frame timing only feeds the cooldown clock.
const STEP_SECONDS: f32 = 0.016;

/// Share of a linked pair's distance error closed per tick.
const CONVERGENCE_RATE: f64 = 0.6;

/// Largest distance one pairwise force can move a node in a tick, in pixels.
const MAX_STEP_PX: f64 = 40.0;

/// Seed spiral scale, relative to the link distance.
const SEED_SPACING: f64 = 0.2;

/// d3's golden-angle increment for seeding nodes on a spiral.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// A position in graph space, origin at the viewport center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// Node id to current position. Read-only outside this module.
#[derive(Clone, Debug, Default)]
pub struct Positions {
	by_id: HashMap<String, Point>,
}

impl Positions {
	pub fn get(&self, id: &str) -> Option<Point> {
		self.by_id.get(id).copied()
	}

	pub fn len(&self) -> usize {
		self.by_id.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_id.is_empty()
	}

	#[cfg(test)]
	pub(crate) fn from_points<'a>(points: impl IntoIterator<Item = (&'a str, Point)>) -> Self {
		Self {
			by_id: points
				.into_iter()
				.map(|(id, p)| (id.to_string(), p))
				.collect(),
		}
	}
}

/// Engine parameters, before any layout configuration is applied.
#[derive(Clone, Debug)]
struct EngineParams {
	force_charge: f32,
	force_spring: f32,
	force_max: f32,
	node_speed: f32,
	damping_factor: f32,
	mass: f32,
}

impl Default for EngineParams {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			mass: 10.0,
		}
	}
}

impl EngineParams {
	/// Translates d3-style forces into `force_graph` terms.
	///
	/// `force_graph` springs have no rest length, so the spring constant is
	/// chosen to balance the pairwise repulsion exactly at `link_distance`:
	/// `k * d / 2 = charge * m^2 / d^2`.
	///
	/// The engine integrates force twice per step, so a node settles at
	/// `gain = node_speed * dt^3 * damping / (1 - damping)` pixels per unit of
	/// force. Near `link_distance` a pair's separation error shrinks by
	/// `2 * gain * 3 * charge * m^2 / d^3` per tick; node speed is picked to
	/// make that [`CONVERGENCE_RATE`], whatever the configured forces.
	fn from_layout(config: &LayoutConfig) -> Self {
		let charge = config.charge_strength.abs();
		let mass = config.node_mass;
		let distance = config.link_distance.max(1.0);
		let repulsion = (charge * mass * mass).max(1.0);
		let spring = 2.0 * repulsion / distance.powi(3);

		let damping = (1.0 - config.velocity_decay).clamp(0.05, 0.95);
		let gain = CONVERGENCE_RATE * distance.powi(3) / (6.0 * repulsion);
		let step = f64::from(STEP_SECONDS);
		let node_speed = gain * (1.0 - damping) / (damping * step.powi(3));

		Self {
			force_charge: charge as f32,
			force_spring: spring as f32,
			force_max: (MAX_STEP_PX / gain) as f32,
			node_speed: node_speed as f32,
			damping_factor: damping as f32,
			mass: mass as f32,
		}
	}

	fn to_engine(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Cooling schedule. Mirrors d3: alpha eases towards zero each tick.
#[derive(Clone, Debug)]
struct Cooling {
	alpha_decay: f64,
	alpha_min: f64,
	cooldown_ticks: u32,
	cooldown_time_ms: f64,
}

impl Default for Cooling {
	fn default() -> Self {
		// d3's stock schedule: ~300 ticks to settle.
		Self {
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			alpha_min: 0.001,
			cooldown_ticks: u32::MAX,
			cooldown_time_ms: 15_000.0,
		}
	}
}

/// Seed position of the `i`th node: d3's phyllotaxis arrangement.
fn seed_point(i: usize, spacing: f64) -> Point {
	let radius = spacing * (0.5 + i as f64).sqrt();
	let angle = i as f64 * GOLDEN_ANGLE;
	Point::new(radius * angle.cos(), radius * angle.sin())
}

/// Force-directed simulation over the current [`RenderGraph`].
pub struct Simulation {
	graph: ForceGraph<String, ()>,
	params: EngineParams,
	cooling: Cooling,
	drag_enabled: bool,
	seed_spacing: f64,
	source: Arc<RenderGraph>,
	positions: Positions,
	alpha: f64,
	ticks: u32,
	elapsed_ms: f64,
	running: bool,
}

impl Default for Simulation {
	fn default() -> Self {
		Self::new()
	}
}

impl Simulation {
	pub fn new() -> Self {
		let params = EngineParams::default();
		Self {
			graph: ForceGraph::new(params.to_engine()),
			params,
			cooling: Cooling::default(),
			drag_enabled: true,
			seed_spacing: LayoutConfig::default().link_distance * SEED_SPACING,
			source: Arc::default(),
			positions: Positions::default(),
			alpha: 1.0,
			ticks: 0,
			elapsed_ms: 0.0,
			running: false,
		}
	}

	/// Replaces the simulated graph and reheats.
	///
	/// Nodes that were already simulated keep their position; new nodes are
	/// seeded on a golden-angle spiral around the origin, which spreads out
	/// with the node count.
	pub fn load(&mut self, graph: Arc<RenderGraph>) {
		self.source = graph;
		self.rebuild();
		self.alpha = 1.0;
		self.ticks = 0;
		self.elapsed_ms = 0.0;
		self.running = !self.source.is_empty();
	}

	fn rebuild(&mut self) {
		let mut graph = ForceGraph::new(self.params.to_engine());
		let mut id_to_idx = HashMap::new();
		let mut positions = HashMap::with_capacity(self.source.nodes.len());

		for (i, node) in self.source.nodes.iter().enumerate() {
			let at = self
				.positions
				.get(&node.id)
				.unwrap_or_else(|| seed_point(i, self.seed_spacing));
			let idx = graph.add_node(NodeData {
				x: at.x as f32,
				y: at.y as f32,
				mass: self.params.mass,
				is_anchor: false,
				user_data: node.id.clone(),
			});
			id_to_idx.insert(node.id.as_str(), idx);
			positions.insert(node.id.clone(), at);
		}

		for link in &self.source.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		self.graph = graph;
		self.positions = Positions { by_id: positions };
	}

	/// Advances the simulation by one tick. `dt_ms` is the wall time since
	/// the previous frame and only counts against the cooldown time. Returns
	/// whether the simulation is still running afterwards.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		if !self.running {
			return false;
		}

		// Alpha is the cooling clock; the engine's damping does the easing.
		self.alpha -= self.alpha * self.cooling.alpha_decay;
		self.graph.update(STEP_SECONDS);
		self.sync_positions();

		self.ticks += 1;
		self.elapsed_ms += dt_ms.max(0.0);
		if self.ticks >= self.cooling.cooldown_ticks
			|| self.elapsed_ms >= self.cooling.cooldown_time_ms
			|| self.alpha < self.cooling.alpha_min
		{
			self.running = false;
			info!(
				"network: layout settled after {} ticks ({:.0} ms)",
				self.ticks, self.elapsed_ms
			);
		}
		self.running
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions.by_id;
		self.graph.visit_nodes(|node| {
			if let Some(p) = positions.get_mut(&node.data.user_data) {
				p.x = node.x() as f64;
				p.y = node.y() as f64;
			}
		});
	}

	pub fn positions(&self) -> &Positions {
		&self.positions
	}

	pub fn graph(&self) -> &Arc<RenderGraph> {
		&self.source
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn ticks(&self) -> u32 {
		self.ticks
	}

	pub fn drag_enabled(&self) -> bool {
		self.drag_enabled
	}
}

impl SimulationHandle for Simulation {
	fn apply_layout(&mut self, config: &LayoutConfig) {
		self.params = EngineParams::from_layout(config);
		self.cooling = Cooling {
			alpha_decay: config.alpha_decay,
			alpha_min: config.alpha_min,
			cooldown_ticks: config.cooldown_ticks,
			cooldown_time_ms: config.cooldown_time_ms,
		};
		self.drag_enabled = config.drag_enabled;
		self.seed_spacing = config.link_distance * SEED_SPACING;
		// Forces live inside the engine graph; rebuild it in place.
		self.rebuild();
	}
}
