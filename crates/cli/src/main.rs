use clap::Parser;
use tracing::error;

mod cli;
mod commands;
mod logging;
mod output;

use cli::Cli;

fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli) {
		error!(target = "aas", error = %err, "command failed");
		std::process::exit(1);
	}
}
