//! Where the raw network comes from.
//!
//! A page may embed the payload in a `<script id="graph-data">` element;
//! otherwise it is fetched per alert from the case API. Either way the view
//! only sees a [`GraphLoad`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use gloo_net::http::Request;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::network_graph::NetworkGraph;
use crate::error::{NetworkError, Result};

/// Locations of the network data.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
	/// Prefix of the case API, without a trailing slash.
	pub api_base: String,
	/// Id of the script element carrying an embedded payload.
	pub element_id: String,
	/// Attribute on the document root naming the alert to show.
	pub alert_attribute: String,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			api_base: "/api".into(),
			element_id: "graph-data".into(),
			alert_attribute: "data-alert-id".into(),
		}
	}
}

impl SourceConfig {
	pub fn network_url(&self, alert_id: &str) -> String {
		format!("{}/alerts/{alert_id}/network", self.api_base.trim_end_matches('/'))
	}
}

/// Fetch state handed to the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GraphLoad {
	#[default]
	Loading,
	Failed(String),
	/// `None` when there is no network to show.
	Ready(Option<Arc<NetworkGraph>>),
}

impl GraphLoad {
	pub fn from_result(result: Result<Arc<NetworkGraph>>) -> Self {
		match result {
			Ok(graph) => Self::Ready(Some(graph)),
			Err(err) => Self::Failed(err.to_string()),
		}
	}
}

/// Last graph seen per alert.
///
/// Storing a graph equal to the cached one hands back the cached `Arc`, so a
/// refetch that changed nothing keeps its identity and the layout in place.
#[derive(Debug, Default)]
pub struct NetworkCache {
	by_alert: HashMap<String, Arc<NetworkGraph>>,
}

impl NetworkCache {
	pub fn store(&mut self, alert_id: &str, graph: NetworkGraph) -> Arc<NetworkGraph> {
		if let Some(cached) = self.by_alert.get(alert_id) {
			if **cached == graph {
				return Arc::clone(cached);
			}
		}
		let graph = Arc::new(graph);
		self.by_alert.insert(alert_id.to_owned(), Arc::clone(&graph));
		graph
	}

	pub fn get(&self, alert_id: &str) -> Option<Arc<NetworkGraph>> {
		self.by_alert.get(alert_id).cloned()
	}
}

/// Parses a network payload.
pub fn parse_graph(json: &str) -> Result<NetworkGraph> {
	let graph: NetworkGraph = serde_json::from_str(json)?;
	info!(
		"network: loaded {} nodes, {} edges",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

/// Payload embedded in the page, if any.
pub fn embedded_graph(config: &SourceConfig) -> Option<Result<NetworkGraph>> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document
		.get_element_by_id(&config.element_id)?
		.dyn_into()
		.ok()?;
	let json = script.text().ok()?;
	Some(parse_graph(&json))
}

/// Alert id named on the document root.
pub fn alert_id(config: &SourceConfig) -> Option<String> {
	web_sys::window()?
		.document()?
		.document_element()?
		.get_attribute(&config.alert_attribute)
		.filter(|id| !id.is_empty())
}

/// `GET {api_base}/alerts/{alert_id}/network`.
pub async fn fetch_network(config: &SourceConfig, alert_id: &str) -> Result<NetworkGraph> {
	let url = config.network_url(alert_id);
	let response = Request::get(&url)
		.send()
		.await
		.map_err(|e| NetworkError::Load(e.to_string()))?;
	if !response.ok() {
		return Err(NetworkError::Load(format!(
			"{url} returned {}",
			response.status()
		)));
	}
	let graph: NetworkGraph = response
		.json()
		.await
		.map_err(|e| NetworkError::Parse(e.to_string()))?;
	info!(
		"network: fetched {} nodes, {} edges for alert {alert_id}",
		graph.nodes.len(),
		graph.edges.len()
	);
	Ok(graph)
}

/// Fetches the alert's network through `cache`.
pub async fn load_network(
	config: &SourceConfig,
	alert_id: &str,
	cache: Rc<RefCell<NetworkCache>>,
) -> GraphLoad {
	let result = fetch_network(config, alert_id)
		.await
		.map(|graph| cache.borrow_mut().store(alert_id, graph));
	if let Err(err) = &result {
		warn!("network: {err}");
	}
	GraphLoad::from_result(result)
}
