//! Page-navigation primitive consumed by the gate.

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

use aas_protocol::TabId;

/// Navigation side-effect failure, surfaced to the caller as a value.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct NavigatorError(pub String);

/// Performs the actual page navigation for a tab.
///
/// The gate calls this only from `safe_navigate`, after the check passed and
/// the attempt was recorded. In the extension this wraps the tabs API; tests
/// use [`FakeNavigator`].
#[async_trait]
pub trait Navigator: Send + Sync {
	async fn navigate(&self, tab: TabId, url: &str) -> Result<(), NavigatorError>;
}

/// In-memory navigator double recording every call.
///
/// `fail_with` injects a failure for the next calls; the call is still
/// recorded so tests can assert ordering against the gate's history.
#[derive(Debug, Default)]
pub struct FakeNavigator {
	calls: Mutex<Vec<(TabId, String)>>,
	fail_with: Mutex<Option<String>>,
}

impl FakeNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_with(&self, message: impl Into<String>) {
		*self.fail_with.lock() = Some(message.into());
	}

	pub fn calls(&self) -> Vec<(TabId, String)> {
		self.calls.lock().clone()
	}
}

#[async_trait]
impl Navigator for FakeNavigator {
	async fn navigate(&self, tab: TabId, url: &str) -> Result<(), NavigatorError> {
		self.calls.lock().push((tab, url.to_string()));
		match self.fail_with.lock().as_ref() {
			Some(message) => Err(NavigatorError(message.clone())),
			None => Ok(()),
		}
	}
}
