//! case-network: transaction network view for alert investigations.
//!
//! This crate provides a WASM canvas component that renders the accounts and
//! counterparties linked to an alert as a force-directed network, with hover
//! tooltips for nodes and individual transactions.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;
pub mod error;
pub mod source;

pub use components::network_graph::{NetworkEdge, NetworkGraph, NetworkNode, TransactionNetwork};
pub use error::{NetworkError, Result};
pub use source::{GraphLoad, NetworkCache, SourceConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("case-network: logging initialized");
}

/// Main application component.
/// Shows the embedded network if the page carries one, otherwise fetches the
/// network of the alert named on the document root.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = SourceConfig::default();
	let graph = RwSignal::new(GraphLoad::Loading);
	let cache = Rc::new(RefCell::new(NetworkCache::default()));
	let alert = source::alert_id(&config);

	let fetch = {
		let (config, alert, cache) = (config.clone(), alert.clone(), cache.clone());
		move || {
			let Some(alert) = alert.clone() else {
				return;
			};
			let (config, cache) = (config.clone(), cache.clone());
			spawn_local(async move {
				graph.set(source::load_network(&config, &alert, cache).await);
			});
		}
	};

	match source::embedded_graph(&config) {
		Some(Ok(raw)) => graph.set(GraphLoad::Ready(Some(Arc::new(raw)))),
		Some(Err(err)) => {
			warn!("case-network: embedded payload rejected: {err}");
			graph.set(GraphLoad::Failed(err.to_string()));
		}
		None if alert.is_some() => fetch(),
		None => {
			info!("case-network: no alert selected");
			graph.set(GraphLoad::Ready(None));
		}
	}

	let refresh = alert.is_some().then(|| {
		let fetch = fetch.clone();
		view! {
			<button class="network-refresh" on:click=move |_| fetch()>
				"Refresh"
			</button>
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Transaction Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="network-panel">
			<header class="network-header">
				<h2>"Transaction Network"</h2>
				{alert.map(|id| view! { <span class="network-alert">{id}</span> })}
				{refresh}
			</header>
			<TransactionNetwork graph=graph />
		</section>
	}
}
