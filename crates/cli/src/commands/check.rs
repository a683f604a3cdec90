//! Dry-run of the gate decision against the persisted store.

use serde::Serialize;

use aas_gate::{GateKey, NavigationGate, Verdict};

use crate::output::{CommandResult, OutputFormat, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckData {
	key: GateKey,
	allowed: bool,
	#[serde(flatten)]
	verdict: Verdict,
}

pub fn execute(
	gate: &NavigationGate,
	tab: u32,
	domain: String,
	reason: &str,
	correlation_id: Option<&str>,
	format: OutputFormat,
) -> anyhow::Result<()> {
	let key = GateKey::new(tab, domain);
	let verdict = gate.can_navigate(&key, reason, correlation_id);
	let data = CheckData {
		allowed: verdict.allowed(),
		verdict,
		key,
	};

	print_result(format, &CommandResult::new("check", data), |data| match data.verdict.denial() {
		None => format!("{}: navigation allowed", data.key),
		Some(denial) => format!("{}: navigation denied - {}", data.key, denial.reason),
	})
}
