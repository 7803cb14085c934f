//! Error type shared by the onboarding crates and adapters

use std::fmt;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	/// Row or column coordinate outside the addressable sheet (0 is never valid)
	OutOfRange { row: u32, col: u32 },
	DbError,
	Parse,
	ConfigError(String),
	ValidationError(String),
	ServiceUnavailable(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::OutOfRange { row, col } => {
				write!(f, "cell out of range: row {}, column {}", row, col)
			}
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ServiceUnavailable(msg) => write!(f, "service unavailable: {}", msg),
			Error::Io(e) => write!(f, "io error: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}


// vim: ts=4
