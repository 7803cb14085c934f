use clap::Parser;
use std::process::ExitCode;

use lunar_onboard::{app, cli::Cli};

#[tokio::main]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_target(false)
		.init();

	let cli = Cli::parse();
	match app::run(cli).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			tracing::error!("{}", err);
			eprintln!("Error: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
