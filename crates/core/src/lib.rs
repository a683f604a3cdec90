//! Navigation loop-prevention gate for automated auction-site login.
//!
//! Automated login flows re-trigger themselves when a site redirects back to
//! the login page: the driver sees "on login page", navigates again, and the
//! cycle repeats until the site rate-limits or locks the account. This crate
//! is the breaker that stops the cycle.
//!
//! All gate state is partitioned per (tab, domain) [`GateKey`] and lives in a
//! session-scoped [`SessionStore`]. The [`NavigationGate`] decides whether an
//! automated navigation may proceed (two rolling wall-clock windows), records
//! every attempt, and trips a persistent block once a window cap is exceeded.
//! [`NavigationGate::safe_navigate`] is the only sanctioned way to perform an
//! automated navigation; the external automation driver owns the state
//! machine transitions via [`NavigationGate::update_tab_state`].

pub mod cleanup;
pub mod clock;
pub mod error;
pub mod gate;
pub mod guard;
pub mod limits;
pub mod navigator;
pub mod notify;
pub mod store;

pub use aas_protocol::{
	GateKey, MAX_HISTORY_ENTRIES, NavigationAttempt, NavigationHistory, TabId, TabState,
	TabStatePatch, TabStateRecord,
};
pub use cleanup::{CleanupHandle, schedule_cleanup};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Denial, DenyCode, NavigateError, Verdict};
pub use gate::NavigationGate;
pub use guard::{Action, action_allowed};
pub use limits::GateLimits;
pub use navigator::{FakeNavigator, Navigator, NavigatorError};
pub use notify::{BlockNotifier, LogNotifier};
pub use store::{FileStore, MemoryStore, SessionStore, StoreError};
