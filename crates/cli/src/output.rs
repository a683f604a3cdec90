//! Command result envelope and rendering.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}

/// Envelope emitted by every command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: &'static str,
	pub data: T,
}

impl<T: Serialize> CommandResult<T> {
	pub fn new(command: &'static str, data: T) -> Self {
		Self {
			ok: true,
			command,
			data,
		}
	}
}

/// Prints the result: JSON envelope, or the provided text rendering.
pub fn print_result<T: Serialize>(
	format: OutputFormat,
	result: &CommandResult<T>,
	text: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
	match format {
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
		OutputFormat::Text => println!("{}", text(&result.data)),
	}
	Ok(())
}
