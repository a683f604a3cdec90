//! Gate state reset for a key.

use serde::Serialize;

use aas_gate::{GateKey, NavigationGate};

use crate::output::{CommandResult, OutputFormat, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearData {
	key: GateKey,
	cleared: bool,
}

pub fn execute(gate: &NavigationGate, tab: u32, domain: String, format: OutputFormat) -> anyhow::Result<()> {
	let key = GateKey::new(tab, domain);
	gate.clear_navigation_history(&key)?;

	let data = ClearData { key, cleared: true };
	print_result(format, &CommandResult::new("clear", data), |data| {
		format!("{} cleared", data.key)
	})
}
