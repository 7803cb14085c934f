pub use onboard_types::error::{ClResult, Error};
pub use onboard_types::types::SubmissionRecord;

pub use tracing::{debug, info, warn};

// vim: ts=4
