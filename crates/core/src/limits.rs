//! Tunable gate thresholds.

use serde::{Deserialize, Serialize};

/// Rate-limit thresholds for one (tab, domain) key.
///
/// Defaults are the conservative production values: one navigation per 15 s
/// burst window, three per 60 s sustained window, two login submissions per
/// automation run. Both windows are checked on every decision; the short one
/// bounds burst loops, the long one bounds slow loops that stay under the
/// burst cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GateLimits {
	pub short_window_ms: u64,
	pub max_short: usize,
	pub long_window_ms: u64,
	pub max_long: usize,
	/// Cap on `SUBMIT_LOGIN` actions per key, enforced by the action guard.
	pub max_submit_attempts: u32,
}

impl Default for GateLimits {
	fn default() -> Self {
		Self {
			short_window_ms: 15_000,
			max_short: 1,
			long_window_ms: 60_000,
			max_long: 3,
			max_submit_attempts: 2,
		}
	}
}

impl GateLimits {
	pub fn short_window_secs(&self) -> u64 {
		self.short_window_ms / 1_000
	}

	pub fn long_window_secs(&self) -> u64 {
		self.long_window_ms / 1_000
	}
}
