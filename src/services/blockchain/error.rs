//! Blockchain service error types.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Errors raised by blockchain clients on top of transport failures
#[derive(ThisError, Debug)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	#[error("Connection error: {0}")]
	ConnectionError(ErrorContext),

	/// Malformed requests or responses that do not match the expected shape
	#[error("Request error: {0}")]
	RequestError(ErrorContext),

	/// The node returned `null` for a requested block
	#[error("Block not found: {0}")]
	BlockNotFound(ErrorContext),

	/// The node returned `null` for a requested receipt
	#[error("Receipt not found: {0}")]
	ReceiptNotFound(ErrorContext),
}

impl BlockChainError {
	pub fn connection_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ConnectionError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn request_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RequestError(ErrorContext::new(msg, source, metadata))
	}

	// Not logged here: the reconciler logs the failed fetch with the header it belongs to.
	pub fn block_not_found(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::BlockNotFound(ErrorContext::new(msg, source, metadata))
	}

	pub fn receipt_not_found(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ReceiptNotFound(ErrorContext::new(msg, source, metadata))
	}
}

impl TraceableError for BlockChainError {
	fn trace_id(&self) -> String {
		match self {
			Self::ConnectionError(ctx)
			| Self::RequestError(ctx)
			| Self::BlockNotFound(ctx)
			| Self::ReceiptNotFound(ctx) => ctx.trace_id.clone(),
		}
	}
}
