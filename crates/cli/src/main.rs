mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = commands::dispatch(cli).await {
		tracing::debug!(target: "nc.cli", error = ?err, "command failed");
		eprintln!("error: {err}");
		std::process::exit(err.exit_code());
	}
}
