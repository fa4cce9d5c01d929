//! Projection of a raw alert network into the renderable node/link set.
//!
//! Customer nodes are dropped, and with them every edge that touches a node
//! outside the rendered set. The projection is memoized on the identity of the
//! raw graph: the simulation treats a new output as a new graph and restarts,
//! so an unchanged input must hand back the very same [`Arc`].

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use super::types::{NetworkEdge, NetworkGraph, NetworkNode, NodeKind};

/// Nodes and links the view actually draws.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderGraph {
	pub nodes: Vec<NetworkNode>,
	/// Every link's endpoints are guaranteed to be in `nodes`.
	pub links: Vec<NetworkEdge>,
}

impl RenderGraph {
	pub fn node(&self, id: &str) -> Option<&NetworkNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Pure projection: keeps non-customer nodes in order and the edges whose
/// endpoints both survive.
pub fn project(raw: &NetworkGraph) -> RenderGraph {
	let nodes: Vec<NetworkNode> = raw
		.nodes
		.iter()
		.filter(|n| n.kind != NodeKind::Customer)
		.cloned()
		.collect();

	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let links: Vec<NetworkEdge> = raw
		.edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.cloned()
		.collect();

	let dropped = raw.edges.len() - links.len();
	if dropped > 0 {
		debug!("network: dropped {dropped} edges referencing unrendered nodes");
	}

	RenderGraph { nodes, links }
}

/// Memoizes [`project`] on the identity of the last raw graph seen.
#[derive(Debug, Default)]
pub struct GraphProjector {
	last: Option<(Arc<NetworkGraph>, Arc<RenderGraph>)>,
}

impl GraphProjector {
	/// Returns the cached projection when `raw` is the same allocation as the
	/// previous call, otherwise recomputes.
	pub fn project(&mut self, raw: &Arc<NetworkGraph>) -> Arc<RenderGraph> {
		if let Some((input, output)) = &self.last {
			if Arc::ptr_eq(input, raw) {
				return Arc::clone(output);
			}
		}

		let output = Arc::new(project(raw));
		info!(
			"network: projected {} nodes, {} links",
			output.nodes.len(),
			output.links.len()
		);
		self.last = Some((Arc::clone(raw), Arc::clone(&output)));
		output
	}
}
