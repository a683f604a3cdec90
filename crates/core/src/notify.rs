//! User-visible block signaling seam.

use aas_protocol::GateKey;
use tracing::{error, info};

/// Surfaces block/clear events to the end user.
///
/// In the extension this sets the badge and shows a one-time alert; the gate
/// only guarantees `blocked` fires once per trip and `cleared` fires when
/// the key is reset.
pub trait BlockNotifier: Send + Sync {
	fn blocked(&self, key: &GateKey, reason: &str);
	fn cleared(&self, key: &GateKey);
}

/// Default notifier: structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl BlockNotifier for LogNotifier {
	fn blocked(&self, key: &GateKey, reason: &str) {
		error!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			reason = %reason,
			"navigation loop detected; automation stopped for this tab"
		);
	}

	fn cleared(&self, key: &GateKey) {
		info!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			"block signal cleared"
		);
	}
}
