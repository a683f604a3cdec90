//! Gate state inspection.

use anyhow::bail;
use serde::Serialize;

use aas_gate::{FileStore, GateKey, GateLimits, NavigationGate};
use aas_protocol::{NavigationHistory, TabStateRecord};

use crate::output::{CommandResult, OutputFormat, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatus {
	key: GateKey,
	history: NavigationHistory,
	state: TabStateRecord,
	limits: GateLimits,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreListing {
	keys: Vec<String>,
}

pub fn execute(
	store: &FileStore,
	gate: &NavigationGate,
	tab: Option<u32>,
	domain: Option<String>,
	format: OutputFormat,
) -> anyhow::Result<()> {
	match (tab, domain) {
		(Some(tab), Some(domain)) => {
			let key = GateKey::new(tab, domain);
			let data = KeyStatus {
				history: gate.navigation_history(&key)?,
				state: gate.tab_state(&key)?,
				limits: gate.limits().clone(),
				key,
			};
			print_result(format, &CommandResult::new("status", data), render_key_status)
		}
		(None, None) => {
			let data = StoreListing { keys: store.keys() };
			print_result(format, &CommandResult::new("status", data), |data| {
				if data.keys.is_empty() {
					"store is empty".to_string()
				} else {
					data.keys.join("\n")
				}
			})
		}
		_ => bail!("status needs both TAB and DOMAIN, or neither"),
	}
}

fn render_key_status(data: &KeyStatus) -> String {
	let mut lines = vec![
		data.key.to_string(),
		format!(
			"  state: {} (submit attempts: {})",
			data.state.state.label(),
			data.state.attempt_count
		),
	];

	if data.history.blocked {
		lines.push(format!(
			"  blocked: yes ({})",
			data.history.block_reason.as_deref().unwrap_or("no reason recorded")
		));
	} else {
		lines.push("  blocked: no".to_string());
	}

	lines.push(format!("  recorded navigations: {}", data.history.attempts.len()));
	for attempt in &data.history.attempts {
		lines.push(format!("    {} {} ({})", attempt.timestamp, attempt.url, attempt.reason));
	}
	lines.join("\n")
}
