//! Network payload as served by the alert investigation API.

use std::fmt;

use serde::Deserialize;

/// Kind of entity a node represents.
///
/// Unrecognized kinds are kept verbatim so newer payloads still render.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
	Account,
	Counterparty,
	/// The investigation subject. Present in payloads, never rendered.
	Customer,
	Other(String),
}

impl From<String> for NodeKind {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"account" => Self::Account,
			"counterparty" => Self::Counterparty,
			"customer" => Self::Customer,
			_ => Self::Other(raw),
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Account => f.write_str("account"),
			Self::Counterparty => f.write_str("counterparty"),
			Self::Customer => f.write_str("customer"),
			Self::Other(raw) => f.write_str(raw),
		}
	}
}

/// Money flow direction of a transaction, relative to the customer's account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Direction {
	Credit,
	Debit,
	Internal,
	Other(String),
	/// Missing or empty in the payload.
	#[default]
	Unknown,
}

impl Direction {
	/// Whether the payload carried a direction at all.
	pub fn is_present(&self) -> bool {
		!matches!(self, Self::Unknown)
	}
}

impl From<String> for Direction {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"credit" => Self::Credit,
			"debit" => Self::Debit,
			"internal" => Self::Internal,
			"" => Self::Unknown,
			_ => Self::Other(raw),
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Credit => f.write_str("credit"),
			Self::Debit => f.write_str("debit"),
			Self::Internal => f.write_str("internal"),
			Self::Other(raw) => f.write_str(raw),
			Self::Unknown => Ok(()),
		}
	}
}

/// An account, counterparty or customer in the transaction network.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NetworkNode {
	/// Unique within one graph. Edges reference nodes by this id.
	pub id: String,
	pub label: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Risk rating (`low`, `medium`, `high`, `critical`), if assessed.
	#[serde(default)]
	pub risk: Option<String>,
}

/// A single transaction between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NetworkEdge {
	pub source: String,
	pub target: String,
	/// Transaction amount in rupees, never negative.
	pub amount: f64,
	/// Transaction category, e.g. `rtgs_transfer`.
	#[serde(rename = "type", default)]
	pub category: String,
	/// ISO-8601 transaction date.
	#[serde(default)]
	pub date: String,
	#[serde(default)]
	pub direction: Direction,
	/// Display name of the counterparty; empty when unknown.
	#[serde(default)]
	pub counterparty: String,
}

/// Complete network for one alert, as returned by `GET /alerts/{id}/network`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NetworkGraph {
	pub nodes: Vec<NetworkNode>,
	pub edges: Vec<NetworkEdge>,
}
