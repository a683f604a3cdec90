//! Per-tab automation state machine record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Automation progress for one (tab, domain) key.
///
/// Success path: `Idle -> OpenedTarget -> OnLoginPage -> SubmittedLogin ->
/// WaitingRedirect -> Done`. Any state may jump to `Blocked` when the loop
/// breaker trips. `Done` and `Blocked` are terminal; a blocked key only
/// leaves that state through an explicit history clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TabState {
	#[default]
	Idle,
	OpenedTarget,
	OnLoginPage,
	SubmittedLogin,
	WaitingRedirect,
	Done,
	Blocked,
}

impl TabState {
	/// Label as stored and logged, e.g. `SUBMITTED_LOGIN`.
	pub fn label(&self) -> &'static str {
		match self {
			TabState::Idle => "IDLE",
			TabState::OpenedTarget => "OPENED_TARGET",
			TabState::OnLoginPage => "ON_LOGIN_PAGE",
			TabState::SubmittedLogin => "SUBMITTED_LOGIN",
			TabState::WaitingRedirect => "WAITING_REDIRECT",
			TabState::Done => "DONE",
			TabState::Blocked => "BLOCKED",
		}
	}

	/// Terminal states require external reset (history clear or tab close).
	pub fn is_terminal(&self) -> bool {
		matches!(self, TabState::Done | TabState::Blocked)
	}
}

impl fmt::Display for TabState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Stored automation state for one (tab, domain) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStateRecord {
	#[serde(default)]
	pub state: TabState,
	/// Opaque id tagging one end-to-end login attempt, for log correlation.
	#[serde(default)]
	pub correlation_id: Option<String>,
	/// Login submissions performed so far for this key.
	#[serde(default)]
	pub attempt_count: u32,
	/// Unix millis of the last driver action, 0 when untouched.
	#[serde(default)]
	pub last_action_at: u64,
	#[serde(default)]
	pub created_at: u64,
}

impl TabStateRecord {
	/// Fresh record in `Idle`, created lazily on first access.
	pub fn new(now_ms: u64) -> Self {
		Self {
			state: TabState::Idle,
			correlation_id: None,
			attempt_count: 0,
			last_action_at: 0,
			created_at: now_ms,
		}
	}

	/// Applies a partial update, last write wins per field.
	pub fn apply(&mut self, patch: TabStatePatch) {
		if let Some(state) = patch.state {
			self.state = state;
		}
		if let Some(correlation_id) = patch.correlation_id {
			self.correlation_id = Some(correlation_id);
		}
		if let Some(attempt_count) = patch.attempt_count {
			self.attempt_count = attempt_count;
		}
		if let Some(last_action_at) = patch.last_action_at {
			self.last_action_at = last_action_at;
		}
	}
}

/// Partial update merged into a [`TabStateRecord`].
///
/// Unset fields keep their stored value; `created_at` is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStatePatch {
	#[serde(default)]
	pub state: Option<TabState>,
	#[serde(default)]
	pub correlation_id: Option<String>,
	#[serde(default)]
	pub attempt_count: Option<u32>,
	#[serde(default)]
	pub last_action_at: Option<u64>,
}

impl TabStatePatch {
	pub fn state(state: TabState) -> Self {
		Self {
			state: Some(state),
			..Default::default()
		}
	}
}
