use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "aas")]
#[command(about = "AAS navigation gate - inspect and control loop-breaker state")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Gate store file (defaults to the user config dir)
	#[arg(long, global = true, value_name = "FILE")]
	pub store: Option<PathBuf>,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

impl Cli {
	/// Resolves the store file, falling back to `<config>/aas/gate.json`.
	pub fn store_path(&self) -> PathBuf {
		self.store.clone().unwrap_or_else(|| {
			dirs::config_dir()
				.unwrap_or_else(|| PathBuf::from("."))
				.join("aas/gate.json")
		})
	}
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show gate state for a key, or list all stored keys
	#[command(alias = "st")]
	Status {
		tab: Option<u32>,
		domain: Option<String>,
	},

	/// Evaluate the live gate decision for a key
	///
	/// Runs the real decision: a key whose windows are already over cap is
	/// blocked by the check, exactly as it would be in the extension.
	Check {
		tab: u32,
		domain: String,
		/// Reason recorded in logs
		#[arg(long, default_value = "cli-check")]
		reason: String,
		/// Correlation id for log correlation
		#[arg(long, value_name = "ID")]
		correlation_id: Option<String>,
	},

	/// Manually trip the breaker for a key
	Block {
		tab: u32,
		domain: String,
		/// Reason stored with the block
		#[arg(long, default_value = "blocked from CLI")]
		reason: String,
	},

	/// Clear gate state for a key after a confirmed success
	Clear { tab: u32, domain: String },
}
