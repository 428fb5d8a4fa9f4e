//! Security error types.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Result type alias for security operations
pub type SecurityResult<T> = Result<T, Box<SecurityError>>;

/// Errors raised while resolving secrets.
#[derive(ThisError, Debug)]
pub enum SecurityError {
	/// A secret failed validation.
	#[error("Validation error: {0}")]
	ValidationError(ErrorContext),

	/// A secret could not be read or parsed.
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),
}

impl SecurityError {
	pub fn validation_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ValidationError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn parse_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for SecurityError {
	fn trace_id(&self) -> String {
		match self {
			Self::ValidationError(ctx) | Self::ParseError(ctx) => ctx.trace_id.clone(),
		}
	}
}
