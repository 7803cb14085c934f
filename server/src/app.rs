//! Wiring of the adapters and execution of the CLI commands

use std::sync::Arc;

use crate::cli::{Cli, Command};
use crate::prelude::*;
use crate::routes;
use onboard_core::Onboarding;
use onboard_sheet_adapter_sqlite::SheetAdapterSqlite;
use onboard_types::email_adapter::SendOutcome;
use onboard_types::types::{RowOutcome, SubmissionEvent};

/// Shared state of the webhook handlers
#[derive(Debug)]
pub struct AppState {
	pub onboarding: Onboarding,
}

impl AppState {
	pub fn new(onboarding: Onboarding) -> Arc<Self> {
		Arc::new(Self { onboarding })
	}
}

/// Opens the sheet and mail adapters described by the command line and environment
pub async fn build(cli: &Cli) -> ClResult<Onboarding> {
	let config = cli.onboard_config()?;
	let sheet = Arc::new(SheetAdapterSqlite::new(&cli.sheet_db).await?);
	let sender = onboard_email::sender_from_settings(cli.smtp.settings()?)?;

	info!("Using sheet database {}", cli.sheet_db.display());
	Ok(Onboarding::new(config, sheet, sender))
}

pub async fn run(cli: Cli) -> ClResult<()> {
	let onboarding = build(&cli).await?;

	match cli.command {
		Command::Setup => {
			let report = onboarding.ensure_schema().await?;
			if report.added.is_empty() {
				println!("Columns already set up");
			} else {
				println!("Added columns: {}", report.added.join(", "));
			}
		}
		Command::TestEmail { to } => match onboarding.send_test_email(&to).await {
			SendOutcome::Sent => println!("Test email sent to {}", to),
			SendOutcome::Failed(reason) => {
				return Err(Error::ServiceUnavailable(format!("test email failed: {}", reason)));
			}
		},
		Command::Preview { html } => {
			let email = onboarding.preview()?;
			println!("Subject: {}\n", email.subject);
			println!("{}", if html { email.html_body } else { email.text_body });
		}
		Command::Backfill => {
			let report = onboarding.run_backfill().await?;
			println!(
				"Processed {} of {} rows ({} emails failed, {} errors)",
				report.processed, report.scanned, report.emails_failed, report.errors
			);
		}
		Command::Submit { row, values } => {
			let outcome = match (row, values.is_empty()) {
				(Some(row), true) => onboarding.process_stored_row(row).await?,
				(row, _) => onboarding
					.handle_submission(&SubmissionEvent { row, values })
					.await
					.ok_or_else(|| Error::ValidationError("submission could not be processed".into()))?,
			};
			match outcome {
				RowOutcome::AlreadyProcessed => println!("Row already has an API key, skipped"),
				RowOutcome::Onboarded { email_status, .. } => {
					println!("API key issued (email sent: {})", email_status);
				}
			}
		}
		Command::Serve { listen } => {
			let router = routes::init(AppState::new(onboarding));
			let listener = tokio::net::TcpListener::bind(listen.as_str()).await?;
			info!("Listening on {}", listen);
			axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
			info!("Server stopped");
		}
	}

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
}

// vim: ts=4
