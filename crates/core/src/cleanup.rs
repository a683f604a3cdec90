//! Scoped cleanup timers for automation sessions.
//!
//! Each automation run owns one cleanup task for its key. The task clears
//! gate state exactly once when the timeout fires; cancelling the handle on
//! confirmed success prevents the fire. This replaces fire-and-forget timer
//! scatter: one session, one timer, one clear.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use aas_protocol::GateKey;

use crate::gate::NavigationGate;

/// Default time after automation start at which gate state is reclaimed.
pub const DEFAULT_CLEANUP_AFTER: Duration = Duration::from_secs(60);

/// Handle to a pending cleanup; dropping it without cancelling lets the
/// timer fire.
pub struct CleanupHandle {
	cancel: oneshot::Sender<()>,
	task: JoinHandle<()>,
}

impl CleanupHandle {
	/// Cancels the pending cleanup, typically on confirmed login success
	/// (the success path clears state itself).
	pub fn cancel(self) {
		// Send fails only if the timer already fired; at-most-once either way.
		let _ = self.cancel.send(());
	}

	/// Waits for the timer to fire or the task to end. Test helper.
	pub async fn join(self) {
		let _ = self.task.await;
	}
}

/// Spawns a cancellable cleanup task that clears `key` after `after`.
///
/// Requires a running tokio runtime.
pub fn schedule_cleanup(gate: Arc<NavigationGate>, key: GateKey, after: Duration) -> CleanupHandle {
	let (cancel_tx, cancel_rx) = oneshot::channel();
	let task = tokio::spawn(async move {
		tokio::select! {
			_ = cancel_rx => {
				info!(target = "aas.cleanup", tab = %key.tab_id, domain = %key.domain, "cleanup cancelled");
			}
			_ = tokio::time::sleep(after) => {
				info!(target = "aas.cleanup", tab = %key.tab_id, domain = %key.domain, "cleanup timeout reached");
				if let Err(err) = gate.clear_navigation_history(&key) {
					warn!(target = "aas.cleanup", tab = %key.tab_id, error = %err, "cleanup clear failed");
				}
			}
		}
	});
	CleanupHandle {
		cancel: cancel_tx,
		task,
	}
}
