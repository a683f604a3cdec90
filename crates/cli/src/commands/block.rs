//! Manual breaker trip.

use serde::Serialize;

use aas_gate::{GateKey, NavigationGate};

use crate::output::{CommandResult, OutputFormat, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockData {
	key: GateKey,
	reason: String,
}

pub fn execute(
	gate: &NavigationGate,
	tab: u32,
	domain: String,
	reason: &str,
	format: OutputFormat,
) -> anyhow::Result<()> {
	let key = GateKey::new(tab, domain);
	gate.block_tab(&key, None, reason)?;

	let data = BlockData {
		key,
		reason: reason.to_string(),
	};
	print_result(format, &CommandResult::new("block", data), |data| {
		format!("{} blocked: {}", data.key, data.reason)
	})
}
