//! Adapter that delivers rendered emails.
//!
//! Delivery failures are an expected outcome, not an error: senders report
//! them as [`SendOutcome::Failed`] so callers can record them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
	pub to: String,
	pub subject: String,
	pub html_body: String,
	pub text_body: String,
	/// Display name of the sender (e.g., "Lunar Landing API Team")
	pub from_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
	Sent,
	Failed(String),
}

impl SendOutcome {
	pub fn is_sent(&self) -> bool {
		matches!(self, SendOutcome::Sent)
	}
}

#[async_trait]
pub trait EmailSender: Debug + Send + Sync {
	async fn send(&self, message: &EmailMessage) -> SendOutcome;
}

// vim: ts=4
