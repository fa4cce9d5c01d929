//! Error types for the network view.

use thiserror::Error;

/// Errors surfaced while loading or mounting the network view.
///
/// Inconsistent payloads are not errors: edges pointing at unrendered nodes
/// are dropped during projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
	/// The network could not be fetched.
	#[error("failed to load network: {0}")]
	Load(String),
	/// The payload was not a valid network graph.
	#[error("invalid network payload: {0}")]
	Parse(String),
	/// A canvas or its 2D context was unavailable.
	#[error("canvas error: {0}")]
	Canvas(String),
	/// The simulation does not exist yet.
	#[error("simulation engine not ready")]
	EngineNotReady,
}

impl From<serde_json::Error> for NetworkError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

/// Result type alias for network view operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
