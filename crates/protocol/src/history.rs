//! Per-key navigation attempt history and block flag.

use serde::{Deserialize, Serialize};

/// Attempt records kept per key; oldest entries are evicted first.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// One automated navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationAttempt {
	/// Unix millis when the attempt was recorded.
	pub timestamp: u64,
	pub url: String,
	/// Driver-supplied reason, e.g. `open-login-page`.
	pub reason: String,
	#[serde(default)]
	pub correlation_id: Option<String>,
}

/// Stored navigation history for one (tab, domain) key.
///
/// Created lazily on the first gate check; cleared on confirmed login
/// success or tab cleanup. Once `blocked` is set the key admits no further
/// automated navigation until the record is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationHistory {
	#[serde(default)]
	pub attempts: Vec<NavigationAttempt>,
	#[serde(default)]
	pub blocked: bool,
	#[serde(default)]
	pub block_reason: Option<String>,
	#[serde(default)]
	pub blocked_at: Option<u64>,
	#[serde(default)]
	pub blocked_correlation_id: Option<String>,
}

impl NavigationHistory {
	/// Appends an attempt, truncating to the [`MAX_HISTORY_ENTRIES`] most recent.
	pub fn record(&mut self, attempt: NavigationAttempt) {
		self.attempts.push(attempt);
		if self.attempts.len() > MAX_HISTORY_ENTRIES {
			let excess = self.attempts.len() - MAX_HISTORY_ENTRIES;
			self.attempts.drain(..excess);
		}
	}

	/// Counts attempts whose timestamp falls inside the rolling window
	/// `now - window_ms < timestamp`.
	pub fn attempts_within(&self, now_ms: u64, window_ms: u64) -> usize {
		self.attempts
			.iter()
			.filter(|attempt| now_ms.saturating_sub(attempt.timestamp) < window_ms)
			.count()
	}

	/// Marks the key blocked. Overwrites reason and timestamp on repeat calls.
	pub fn block(&mut self, reason: impl Into<String>, now_ms: u64, correlation_id: Option<String>) {
		self.blocked = true;
		self.block_reason = Some(reason.into());
		self.blocked_at = Some(now_ms);
		self.blocked_correlation_id = correlation_id;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn attempt(timestamp: u64) -> NavigationAttempt {
		NavigationAttempt {
			timestamp,
			url: format!("https://example.com/{timestamp}"),
			reason: "test".into(),
			correlation_id: None,
		}
	}

	#[test]
	fn record_caps_history_fifo() {
		let mut history = NavigationHistory::default();
		for ts in 0..15 {
			history.record(attempt(ts));
		}
		assert_eq!(history.attempts.len(), MAX_HISTORY_ENTRIES);
		// Oldest five evicted, newest kept in order.
		assert_eq!(history.attempts.first().unwrap().timestamp, 5);
		assert_eq!(history.attempts.last().unwrap().timestamp, 14);
	}

	#[test]
	fn attempts_within_uses_half_open_window() {
		let mut history = NavigationHistory::default();
		history.record(attempt(0));
		history.record(attempt(10_000));

		// At t=15000 the attempt at t=0 is exactly window-old and drops out.
		assert_eq!(history.attempts_within(15_000, 15_000), 1);
		assert_eq!(history.attempts_within(14_999, 15_000), 2);
	}

	#[test]
	fn block_overwrites_reason_and_timestamp() {
		let mut history = NavigationHistory::default();
		history.block("first", 1, Some("run-1".into()));
		history.block("second", 2, None);
		assert!(history.blocked);
		assert_eq!(history.block_reason.as_deref(), Some("second"));
		assert_eq!(history.blocked_at, Some(2));
	}

	#[test]
	fn empty_history_deserializes_from_empty_object() {
		let history: NavigationHistory = serde_json::from_str("{}").unwrap();
		assert!(history.attempts.is_empty());
		assert!(!history.blocked);
	}
}
