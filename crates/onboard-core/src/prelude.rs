pub use onboard_types::error::{ClResult, Error};
pub use onboard_types::types::{ColumnMap, EmailStatus, RowOutcome, SubmissionRecord};

pub use tracing::{debug, error, info, info_span, warn};

// vim: ts=4
