//! Transaction network visualization.
//!
//! Renders an alert's account and counterparty relationships as a
//! force-directed node-link diagram on an HTML canvas:
//! - Customer nodes are dropped, along with every edge touching them
//! - The layout runs a short, damped simulation and then holds still
//! - Hovering a node or a transaction shows a tooltip with its details
//!
//! The projection is memoized on the identity of the incoming graph, so
//! re-renders that hand in the same `Arc` never restart the layout.
//!
//! # Example
//!
//! ```ignore
//! use case_network::{GraphLoad, TransactionNetwork};
//!
//! let graph = RwSignal::new(GraphLoad::Loading);
//! view! { <TransactionNetwork graph=graph /> }
//! ```

pub mod adapter;
mod component;
pub mod format;
pub mod hit;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod simulation;
pub mod state;
pub mod surface;
pub mod theme;
pub mod types;
pub mod viewport;

pub use component::TransactionNetwork;
pub use layout::LayoutConfig;
pub use theme::Style;
pub use types::{Direction, NetworkEdge, NetworkGraph, NetworkNode, NodeKind};
