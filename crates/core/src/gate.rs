//! The navigation gate: per-key rate limiting, block tracking, and the
//! sanctioned navigation entry point.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use aas_protocol::{GateKey, NavigationAttempt, NavigationHistory, TabState, TabStatePatch, TabStateRecord};

use crate::clock::{Clock, SystemClock};
use crate::error::{Denial, DenyCode, NavigateError, Verdict};
use crate::guard::{Action, action_allowed};
use crate::limits::GateLimits;
use crate::navigator::Navigator;
use crate::notify::{BlockNotifier, LogNotifier};
use crate::store::{SessionStore, StoreError};

/// Per-tab, per-domain navigation rate limiter and state tracker.
///
/// Every operation is scoped to a [`GateKey`]; read-modify-write sequences on
/// one key are serialized by a per-key mutex, so a navigation event and a
/// timer-driven cleanup racing on the same key cannot lose updates. Distinct
/// keys never contend.
///
/// Store failures never escape: a gate that cannot read its own history
/// denies navigation rather than letting a possibly-looping driver proceed.
pub struct NavigationGate {
	store: Arc<dyn SessionStore>,
	clock: Arc<dyn Clock>,
	notifier: Arc<dyn BlockNotifier>,
	limits: GateLimits,
	locks: Mutex<HashMap<GateKey, Arc<Mutex<()>>>>,
}

impl NavigationGate {
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self {
			store,
			clock: Arc::new(SystemClock),
			notifier: Arc::new(LogNotifier),
			limits: GateLimits::default(),
			locks: Mutex::new(HashMap::new()),
		}
	}

	pub fn with_limits(mut self, limits: GateLimits) -> Self {
		self.limits = limits;
		self
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}

	pub fn with_notifier(mut self, notifier: Arc<dyn BlockNotifier>) -> Self {
		self.notifier = notifier;
		self
	}

	pub fn limits(&self) -> &GateLimits {
		&self.limits
	}

	/// Decides whether an automated navigation may proceed for `key`.
	///
	/// Denies outright for a blocked key. Otherwise counts attempts inside
	/// the short and long rolling windows; meeting either cap trips the
	/// persistent block and denies.
	pub fn can_navigate(&self, key: &GateKey, reason: &str, correlation_id: Option<&str>) -> Verdict {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.check_locked(key, reason, correlation_id)
	}

	/// Appends an attempt record, truncating history to the most recent ten.
	pub fn record_navigation(
		&self,
		key: &GateKey,
		url: &str,
		reason: &str,
		correlation_id: Option<&str>,
	) -> Result<(), StoreError> {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.record_locked(key, url, reason, correlation_id)
	}

	/// Trips the persistent block for `key` and moves its state to BLOCKED.
	///
	/// Safe to call repeatedly: reason and timestamp are overwritten but the
	/// user-visible signal fires only on the first trip.
	pub fn block_tab(
		&self,
		key: &GateKey,
		correlation_id: Option<&str>,
		reason: &str,
	) -> Result<(), StoreError> {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.block_locked(key, correlation_id, reason)
	}

	/// Removes history and tab-state records and clears the block signal.
	///
	/// Called only on confirmed login success (or session cleanup). Clearing
	/// an already-clear key is a no-op.
	pub fn clear_navigation_history(&self, key: &GateKey) -> Result<(), StoreError> {
		let lock = self.lock_for(key);
		{
			let _guard = lock.lock();
			self.store.remove(&[key.history_key().as_str(), key.state_key().as_str()])?;
		}
		self.locks.lock().remove(key);
		self.notifier.cleared(key);
		info!(target = "aas.gate", tab = %key.tab_id, domain = %key.domain, "navigation history cleared");
		Ok(())
	}

	/// The single sanctioned entry point for automated navigation.
	///
	/// Checks the gate, records the attempt, then performs the side effect.
	/// A denial means nothing was recorded or performed; a recorded attempt
	/// whose side effect fails surfaces as [`NavigateError::Failed`].
	pub async fn safe_navigate(
		&self,
		navigator: &dyn Navigator,
		key: &GateKey,
		url: &str,
		reason: &str,
		correlation_id: Option<&str>,
	) -> Result<(), NavigateError> {
		debug!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			reason = %reason,
			url = %url,
			"navigation request"
		);

		{
			let lock = self.lock_for(key);
			let _guard = lock.lock();

			match self.check_locked(key, reason, correlation_id) {
				Verdict::Allowed => {}
				Verdict::Denied(denial) => return Err(NavigateError::Denied(denial)),
			}

			if let Err(err) = self.record_locked(key, url, reason, correlation_id) {
				warn!(target = "aas.gate", tab = %key.tab_id, error = %err, "recording failed; denying navigation");
				return Err(NavigateError::Denied(Denial::new(DenyCode::StoreUnavailable, err.to_string())));
			}
		}

		navigator
			.navigate(key.tab_id, url)
			.await
			.map_err(|err| NavigateError::Failed(err.to_string()))
	}

	/// Secondary guard for non-navigation driver actions.
	///
	/// Pure decision over the stored tab state; a store failure denies.
	pub fn should_perform_action(&self, key: &GateKey, action: Action) -> bool {
		let lock = self.lock_for(key);
		let _guard = lock.lock();

		let record = match self.load_state(key) {
			Ok(record) => record,
			Err(err) => {
				warn!(target = "aas.gate", tab = %key.tab_id, error = %err, action = action.label(), "state unreadable; denying action");
				return false;
			}
		};

		let allowed = action_allowed(&record, action, &self.limits);
		if !allowed {
			warn!(
				target = "aas.gate",
				tab = %key.tab_id,
				domain = %key.domain,
				action = action.label(),
				state = record.state.label(),
				attempts = record.attempt_count,
				"action denied"
			);
		}
		allowed
	}

	/// Reads the stored tab state, defaulting to a fresh IDLE record.
	pub fn tab_state(&self, key: &GateKey) -> Result<TabStateRecord, StoreError> {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.load_state(key)
	}

	/// Merges a partial update into the stored tab state, last write wins.
	///
	/// Every write logs the before/after state labels.
	pub fn update_tab_state(&self, key: &GateKey, patch: TabStatePatch) -> Result<TabStateRecord, StoreError> {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.update_state_locked(key, patch)
	}

	/// Reads the stored navigation history, defaulting to empty.
	pub fn navigation_history(&self, key: &GateKey) -> Result<NavigationHistory, StoreError> {
		let lock = self.lock_for(key);
		let _guard = lock.lock();
		self.load_history(key)
	}

	fn check_locked(&self, key: &GateKey, reason: &str, correlation_id: Option<&str>) -> Verdict {
		let now = self.clock.now_ms();

		let history = match self.load_history(key) {
			Ok(history) => history,
			Err(err) => {
				warn!(target = "aas.gate", tab = %key.tab_id, error = %err, "history unreadable; denying navigation");
				return Verdict::Denied(Denial::new(DenyCode::StoreUnavailable, err.to_string()));
			}
		};

		if history.blocked {
			let detail = history
				.block_reason
				.as_deref()
				.unwrap_or("previous loop detection");
			warn!(target = "aas.gate", tab = %key.tab_id, domain = %key.domain, "navigation denied: tab is blocked");
			return Verdict::Denied(Denial::new(
				DenyCode::Blocked,
				format!("tab is blocked ({detail})"),
			));
		}

		let recent_short = history.attempts_within(now, self.limits.short_window_ms);
		let recent_long = history.attempts_within(now, self.limits.long_window_ms);

		if recent_short >= self.limits.max_short {
			let cause = format!(
				"exceeded {} navigation(s) per {} seconds",
				self.limits.max_short,
				self.limits.short_window_secs()
			);
			if let Err(err) = self.block_locked(key, correlation_id, &cause) {
				warn!(target = "aas.gate", tab = %key.tab_id, error = %err, "failed to persist block");
			}
			return Verdict::Denied(Denial::new(
				DenyCode::RateShort,
				format!(
					"too many navigations in short window ({} seconds)",
					self.limits.short_window_secs()
				),
			));
		}

		if recent_long >= self.limits.max_long {
			let cause = format!(
				"exceeded {} navigations per {} seconds",
				self.limits.max_long,
				self.limits.long_window_secs()
			);
			if let Err(err) = self.block_locked(key, correlation_id, &cause) {
				warn!(target = "aas.gate", tab = %key.tab_id, error = %err, "failed to persist block");
			}
			return Verdict::Denied(Denial::new(
				DenyCode::RateLong,
				format!(
					"too many navigations in long window ({} seconds)",
					self.limits.long_window_secs()
				),
			));
		}

		info!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			reason = %reason,
			correlation_id = correlation_id.unwrap_or("-"),
			short = %format_args!("{}/{}", recent_short, self.limits.max_short),
			long = %format_args!("{}/{}", recent_long, self.limits.max_long),
			"navigation allowed"
		);
		Verdict::Allowed
	}

	fn record_locked(
		&self,
		key: &GateKey,
		url: &str,
		reason: &str,
		correlation_id: Option<&str>,
	) -> Result<(), StoreError> {
		let mut history = self.load_history(key)?;
		history.record(NavigationAttempt {
			timestamp: self.clock.now_ms(),
			url: url.to_string(),
			reason: reason.to_string(),
			correlation_id: correlation_id.map(String::from),
		});
		self.save_history(key, &history)?;
		debug!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			reason = %reason,
			entries = history.attempts.len(),
			"navigation recorded"
		);
		Ok(())
	}

	fn block_locked(&self, key: &GateKey, correlation_id: Option<&str>, reason: &str) -> Result<(), StoreError> {
		let mut history = self.load_history(key)?;
		let first_trip = !history.blocked;
		history.block(reason, self.clock.now_ms(), correlation_id.map(String::from));
		self.save_history(key, &history)?;

		self.update_state_locked(key, TabStatePatch::state(TabState::Blocked))?;

		if first_trip {
			self.notifier.blocked(key, reason);
		}
		Ok(())
	}

	fn update_state_locked(&self, key: &GateKey, patch: TabStatePatch) -> Result<TabStateRecord, StoreError> {
		let mut record = self.load_state(key)?;
		let before = record.state.label();
		record.apply(patch);
		self.save_state(key, &record)?;
		info!(
			target = "aas.gate",
			tab = %key.tab_id,
			domain = %key.domain,
			from = before,
			to = record.state.label(),
			"tab state updated"
		);
		Ok(record)
	}

	fn load_history(&self, key: &GateKey) -> Result<NavigationHistory, StoreError> {
		match self.store.get(&key.history_key())? {
			Some(value) => decode(value),
			None => Ok(NavigationHistory::default()),
		}
	}

	fn save_history(&self, key: &GateKey, history: &NavigationHistory) -> Result<(), StoreError> {
		self.store.set(&key.history_key(), encode(history)?)
	}

	fn load_state(&self, key: &GateKey) -> Result<TabStateRecord, StoreError> {
		match self.store.get(&key.state_key())? {
			Some(value) => decode(value),
			None => Ok(TabStateRecord::new(self.clock.now_ms())),
		}
	}

	fn save_state(&self, key: &GateKey, record: &TabStateRecord) -> Result<(), StoreError> {
		self.store.set(&key.state_key(), encode(record)?)
	}

	fn lock_for(&self, key: &GateKey) -> Arc<Mutex<()>> {
		Arc::clone(
			self.locks
				.lock()
				.entry(key.clone())
				.or_insert_with(|| Arc::new(Mutex::new(()))),
		)
	}
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, StoreError> {
	serde_json::to_value(value).map_err(|err| StoreError(err.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, StoreError> {
	serde_json::from_value(value).map_err(|err| StoreError(err.to_string()))
}
