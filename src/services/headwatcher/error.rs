//! Head watcher error types and handling.
//!
//! Two families live here: [`HeadWatcherError`] is fatal to the engine and crosses the
//! engine boundary exactly once, while [`ReconcileError`] is scoped to a single header and
//! never stops processing.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Errors that terminate the head watcher
#[derive(ThisError, Debug)]
pub enum HeadWatcherError {
	/// The header subscription failed or ended
	#[error("Subscription error: {0}")]
	SubscriptionError(ErrorContext),

	/// The engine task panicked or was aborted
	#[error("Engine error: {0}")]
	EngineError(ErrorContext),

	/// Setup failures before the engine started
	#[error("Startup error: {0}")]
	StartupError(ErrorContext),
}

impl HeadWatcherError {
	// Subscription error
	pub fn subscription_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SubscriptionError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Engine error
	pub fn engine_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::EngineError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Startup error
	pub fn startup_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::StartupError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for HeadWatcherError {
	fn trace_id(&self) -> String {
		match self {
			Self::SubscriptionError(ctx) | Self::EngineError(ctx) | Self::StartupError(ctx) => {
				ctx.trace_id.clone()
			}
		}
	}
}

/// Failure to reconcile one header. Logged by the reconciler, never fatal.
#[derive(ThisError, Debug)]
pub enum ReconcileError {
	/// The block announced by the header could not be fetched
	#[error("Block fetch error: {0}")]
	BlockFetch(ErrorContext),

	/// The fetched block contradicts the announced header
	#[error("Consistency error: {0}")]
	Consistency(ErrorContext),
}

impl ReconcileError {
	pub fn block_fetch(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::BlockFetch(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn consistency(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Consistency(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for ReconcileError {
	fn trace_id(&self) -> String {
		match self {
			Self::BlockFetch(ctx) | Self::Consistency(ctx) => ctx.trace_id.clone(),
		}
	}
}
