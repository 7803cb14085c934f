//! Submission webhook
//!
//! `POST /api/submissions` takes a submission event and always answers 200
//! with the outcome, the form integration has no use for error details.

use axum::{
	Json, Router,
	extract::State,
	routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::prelude::*;
use onboard_types::types::{RowOutcome, SubmissionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
	Onboarded,
	Skipped,
	Error,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
	pub status: SubmissionStatus,
}

async fn post_submission(
	State(state): State<Arc<AppState>>,
	Json(event): Json<SubmissionEvent>,
) -> Json<SubmissionResponse> {
	let status = match state.onboarding.handle_submission(&event).await {
		Some(RowOutcome::Onboarded { .. }) => SubmissionStatus::Onboarded,
		Some(RowOutcome::AlreadyProcessed) => SubmissionStatus::Skipped,
		None => SubmissionStatus::Error,
	};
	debug!("Submission handled: {:?}", status);
	Json(SubmissionResponse { status })
}

pub fn init(state: Arc<AppState>) -> Router {
	Router::new()
		.route("/health", get(async || "ok"))
		.route("/api/submissions", post(post_submission))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// vim: ts=4
