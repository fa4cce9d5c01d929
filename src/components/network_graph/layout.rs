//! One-time configuration of the force simulation.
//!
//! The simulation starts with the engine's generic defaults. Those oscillate
//! visibly on dense transaction networks, so the view overrides them with
//! [`LayoutConfig`] exactly once per mounted engine. The controller is polled
//! every frame; after the first successful configuration it short-circuits.

use log::info;

use crate::error::{NetworkError, Result};

/// Force and cooling parameters handed to the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Preferred link length in pixels.
	pub link_distance: f64,
	/// Stop after this many ticks...
	pub cooldown_ticks: u32,
	/// ...or after this much wall time, whichever comes first.
	pub cooldown_time_ms: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Stop once alpha falls below this.
	pub alpha_min: f64,
	pub node_mass: f64,
	pub drag_enabled: bool,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			charge_strength: -400.0,
			link_distance: 150.0,
			cooldown_ticks: 60,
			cooldown_time_ms: 3000.0,
			alpha_decay: 0.06,
			velocity_decay: 0.5,
			alpha_min: 0.001,
			node_mass: 10.0,
			drag_enabled: false,
		}
	}
}

/// Anything that can accept a [`LayoutConfig`].
pub trait SimulationHandle {
	fn apply_layout(&mut self, config: &LayoutConfig);
}

/// Applies a [`LayoutConfig`] to a simulation at most once.
#[derive(Debug, Default)]
pub struct ForceLayoutController {
	config: LayoutConfig,
	configured: bool,
}

impl ForceLayoutController {
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			config,
			configured: false,
		}
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn is_configured(&self) -> bool {
		self.configured
	}

	/// Configures `handle` unless that already happened.
	///
	/// Returns `Ok(true)` when configuration was applied by this call and
	/// `Ok(false)` when it was a no-op. A missing handle leaves the latch
	/// unset so a later call can still succeed.
	pub fn ensure_configured<H>(&mut self, handle: Option<&mut H>) -> Result<bool>
	where
		H: SimulationHandle + ?Sized,
	{
		if self.configured {
			return Ok(false);
		}
		let handle = handle.ok_or(NetworkError::EngineNotReady)?;
		handle.apply_layout(&self.config);
		self.configured = true;
		info!(
			"network: layout configured (charge {}, link distance {})",
			self.config.charge_strength, self.config.link_distance
		);
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct CountingHandle {
		applied: Vec<LayoutConfig>,
	}

	impl SimulationHandle for CountingHandle {
		fn apply_layout(&mut self, config: &LayoutConfig) {
			self.applied.push(config.clone());
		}
	}

	#[test]
	fn defaults_match_the_stable_layout() {
		let config = LayoutConfig::default();
		assert_eq!(config.charge_strength, -400.0);
		assert_eq!(config.link_distance, 150.0);
		assert_eq!(config.cooldown_ticks, 60);
		assert_eq!(config.cooldown_time_ms, 3000.0);
		assert_eq!(config.alpha_decay, 0.06);
		assert_eq!(config.velocity_decay, 0.5);
		assert!(!config.drag_enabled);
	}

	#[test]
	fn configures_once() {
		let mut controller = ForceLayoutController::default();
		let mut handle = CountingHandle::default();

		assert!(controller.ensure_configured(Some(&mut handle)).unwrap());
		assert!(!controller.ensure_configured(Some(&mut handle)).unwrap());
		assert!(!controller.ensure_configured(Some(&mut handle)).unwrap());

		assert_eq!(handle.applied.len(), 1);
		assert_eq!(handle.applied[0], LayoutConfig::default());
	}

	#[test]
	fn missing_handle_does_not_latch() {
		let mut controller = ForceLayoutController::default();

		let err = controller
			.ensure_configured::<CountingHandle>(None)
			.unwrap_err();
		assert!(matches!(err, NetworkError::EngineNotReady));
		assert!(!controller.is_configured());

		let mut handle = CountingHandle::default();
		assert!(controller.ensure_configured(Some(&mut handle)).unwrap());
		assert_eq!(handle.applied.len(), 1);
	}
}
