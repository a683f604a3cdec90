//! Gate decision and navigation error types.
//!
//! Denials and navigation failures are values returned to the caller; gate
//! operations never panic and never surface store errors as exceptions.

use serde::Serialize;
use thiserror::Error;

/// Machine-readable denial category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenyCode {
	/// Key previously tripped the breaker; denied until history is cleared.
	Blocked,
	/// Short-window cap exceeded.
	RateShort,
	/// Long-window cap exceeded.
	RateLong,
	/// Session store read/write failed; the gate fails closed.
	StoreUnavailable,
}

/// A denied gate decision with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{reason}")]
pub struct Denial {
	pub code: DenyCode,
	pub reason: String,
}

impl Denial {
	pub fn new(code: DenyCode, reason: impl Into<String>) -> Self {
		Self {
			code,
			reason: reason.into(),
		}
	}
}

/// Outcome of a `can_navigate` check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "camelCase")]
pub enum Verdict {
	Allowed,
	Denied(Denial),
}

impl Verdict {
	pub fn allowed(&self) -> bool {
		matches!(self, Verdict::Allowed)
	}

	pub fn denial(&self) -> Option<&Denial> {
		match self {
			Verdict::Allowed => None,
			Verdict::Denied(denial) => Some(denial),
		}
	}
}

/// Failure returned by `safe_navigate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
	/// The gate refused the navigation; nothing was recorded or performed.
	#[error("navigation denied: {0}")]
	Denied(Denial),
	/// The underlying navigation side effect failed after being recorded.
	#[error("navigation failed: {0}")]
	Failed(String),
}

impl NavigateError {
	pub fn denial(&self) -> Option<&Denial> {
		match self {
			NavigateError::Denied(denial) => Some(denial),
			NavigateError::Failed(_) => None,
		}
	}
}
