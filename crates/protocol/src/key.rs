//! Gate state partitioning key and store-key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single browser navigation context being automated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<u32> for TabId {
	fn from(id: u32) -> Self {
		Self(id)
	}
}

/// Partition key for all gate state: one tab automating one domain.
///
/// History, tab state, and block flags never span domains; two tabs on the
/// same domain are likewise independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateKey {
	pub tab_id: TabId,
	pub domain: String,
}

impl GateKey {
	pub fn new(tab_id: impl Into<TabId>, domain: impl Into<String>) -> Self {
		Self {
			tab_id: tab_id.into(),
			domain: domain.into(),
		}
	}

	/// Store key holding the [`NavigationHistory`](crate::NavigationHistory) record.
	pub fn history_key(&self) -> String {
		format!("nav_history_{}_{}", self.tab_id, self.domain)
	}

	/// Store key holding the [`TabStateRecord`](crate::TabStateRecord).
	pub fn state_key(&self) -> String {
		format!("tab_state_{}_{}", self.tab_id, self.domain)
	}
}

impl fmt::Display for GateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "tab {} ({})", self.tab_id, self.domain)
	}
}
