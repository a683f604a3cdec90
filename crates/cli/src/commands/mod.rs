//! Command dispatch over the persisted gate store.

mod block;
mod check;
mod clear;
mod status;

use std::sync::Arc;

use aas_gate::{FileStore, NavigationGate, SessionStore};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: Cli) -> anyhow::Result<()> {
	let store = Arc::new(FileStore::open(cli.store_path()));
	let gate = NavigationGate::new(Arc::clone(&store) as Arc<dyn SessionStore>);
	let format = cli.format;

	match cli.command {
		Commands::Status { tab, domain } => status::execute(&store, &gate, tab, domain, format),
		Commands::Check {
			tab,
			domain,
			reason,
			correlation_id,
		} => check::execute(&gate, tab, domain, &reason, correlation_id.as_deref(), format),
		Commands::Block { tab, domain, reason } => block::execute(&gate, tab, domain, &reason, format),
		Commands::Clear { tab, domain } => clear::execute(&gate, tab, domain, format),
	}
}
