//! Submission records, column layout and per-row outcomes

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORGANIZATION: &str = "Independent";
pub const DEFAULT_USE_CASE: &str = "Not specified";
pub const DEFAULT_SOURCE: &str = "Not specified";

/// Header labels of the two derived columns
pub const API_KEY_HEADER: &str = "API Key";
pub const EMAIL_SENT_HEADER: &str = "Email Sent";

/// 0-based positions of the submission fields in a sheet row.
///
/// Storage is addressed 1-based, use [`ColumnMap::cell`] to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
	pub timestamp: usize,
	pub email: usize,
	pub name: usize,
	pub organization: usize,
	pub role: usize,
	pub use_case: usize,
	pub source: usize,
	pub api_key: usize,
	pub email_sent: usize,
}

impl Default for ColumnMap {
	fn default() -> Self {
		Self {
			timestamp: 0,
			email: 1,
			name: 2,
			organization: 3,
			role: 4,
			use_case: 5,
			source: 6,
			api_key: 7,
			email_sent: 8,
		}
	}
}

impl ColumnMap {
	/// Storage column (1-based) of a 0-based field index
	pub fn cell(idx: usize) -> u32 {
		u32::try_from(idx).map_or(u32::MAX, |idx| idx.saturating_add(1))
	}

	pub fn api_key_col(&self) -> u32 {
		Self::cell(self.api_key)
	}

	pub fn email_sent_col(&self) -> u32 {
		Self::cell(self.email_sent)
	}

	/// Number of submission columns, derived ones excluded
	pub fn field_count(&self) -> usize {
		[
			self.timestamp,
			self.email,
			self.name,
			self.organization,
			self.role,
			self.use_case,
			self.source,
		]
		.into_iter()
		.max()
		.map_or(0, |max| max + 1)
	}
}

/// One form response, with defaults applied to the optional fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
	pub timestamp: String,
	pub email: String,
	pub name: String,
	pub organization: String,
	pub role: String,
	pub use_case: String,
	pub source: String,
}

fn field(values: &[String], idx: usize) -> Option<&str> {
	values.get(idx).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn text(values: &[String], idx: usize) -> String {
	field(values, idx).unwrap_or_default().to_string()
}

fn text_or(values: &[String], idx: usize, default: &str) -> String {
	field(values, idx).unwrap_or(default).to_string()
}

impl SubmissionRecord {
	/// Builds a record from the ordered cell values of a row.
	///
	/// Missing or blank values are empty, except organization, use case and
	/// source which fall back to their defaults.
	pub fn from_values(values: &[String], cols: &ColumnMap) -> Self {
		Self {
			timestamp: text(values, cols.timestamp),
			email: text(values, cols.email),
			name: text(values, cols.name),
			organization: text_or(values, cols.organization, DEFAULT_ORGANIZATION),
			role: text(values, cols.role),
			use_case: text_or(values, cols.use_case, DEFAULT_USE_CASE),
			source: text_or(values, cols.source, DEFAULT_SOURCE),
		}
	}

	/// First whitespace-delimited token of the name, if any
	pub fn first_name(&self) -> Option<&str> {
		self.name.split_whitespace().next()
	}
}

/// Outcome of an email attempt as stored in the `Email Sent` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailStatus {
	Sent,
	Failed,
}

impl EmailStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			EmailStatus::Sent => "Yes",
			EmailStatus::Failed => "Failed",
		}
	}

	/// Parses a stored cell; an empty or unknown cell means no attempt was recorded
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim() {
			"Yes" => Some(EmailStatus::Sent),
			"Failed" => Some(EmailStatus::Failed),
			_ => None,
		}
	}
}

impl std::fmt::Display for EmailStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// "Submission created" event delivered by the form integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionEvent {
	/// 1-based row of the submission. `None` asks for the values to be appended first.
	#[serde(default)]
	pub row: Option<u32>,
	/// Ordered field values of the row
	pub values: Vec<String>,
}

/// Result of running the onboarding transition on one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
	/// The row already carried an API key, nothing was written or sent
	AlreadyProcessed,
	Onboarded { api_key: String, email_status: EmailStatus },
}


// vim: ts=4
