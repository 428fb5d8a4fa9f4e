//! Head watcher lifecycle.
//!
//! [`HeadWatcherService`] owns the single engine task. Its outcome is observed through
//! [`HeadWatcherService::wait_for_shutdown`], which races the engine against an external
//! cancellation future.

use std::{collections::HashMap, future::Future};

use tokio::{
	sync::watch,
	task::{JoinError, JoinHandle},
};

use crate::services::{
	blockchain::EvmClientTrait,
	headwatcher::{
		error::HeadWatcherError,
		reconciler::{run_engine, EngineExit, EngineState, HeadReconciler},
		subscription::HeadSubscription,
	},
};

/// How the head watcher came to a stop
#[derive(Debug)]
pub enum ShutdownReason {
	/// The subscription failed; carries its terminal error
	TransportFailed(HeadWatcherError),
	/// The cancellation future resolved first
	Cancelled,
}

impl ShutdownReason {
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

type EngineHandle = JoinHandle<Result<EngineExit, HeadWatcherError>>;

/// Running head watcher
pub struct HeadWatcherService {
	engine: EngineHandle,
	shutdown: watch::Sender<bool>,
	state: watch::Receiver<EngineState>,
}

impl HeadWatcherService {
	/// Spawns the engine task for `subscription` and `reconciler`.
	pub fn start<C: EvmClientTrait + 'static>(
		subscription: HeadSubscription,
		reconciler: HeadReconciler<C>,
	) -> Self {
		let (shutdown_tx, shutdown_rx) = watch::channel(false);
		let (state_tx, state_rx) = watch::channel(EngineState::Running);

		let engine = tokio::spawn(run_engine(subscription, reconciler, shutdown_rx, state_tx));

		Self {
			engine,
			shutdown: shutdown_tx,
			state: state_rx,
		}
	}

	/// Receiver following the engine state
	pub fn state(&self) -> watch::Receiver<EngineState> {
		self.state.clone()
	}

	pub fn is_running(&self) -> bool {
		*self.state.borrow() == EngineState::Running
	}

	/// Waits until the engine fails or `cancel` resolves, whichever happens first.
	///
	/// On cancellation the engine is signalled and joined before returning. Consuming the
	/// service makes the outcome observable exactly once.
	pub async fn wait_for_shutdown<F>(mut self, cancel: F) -> ShutdownReason
	where
		F: Future<Output = ()>,
	{
		let reason = tokio::select! {
			biased;
			joined = &mut self.engine => match outcome(joined) {
				Ok(EngineExit::Cancelled) => ShutdownReason::Cancelled,
				Err(e) => ShutdownReason::TransportFailed(e),
			},
			_ = cancel => {
				tracing::info!("Cancellation requested, stopping head watcher");
				self.shutdown.send_replace(true);
				if let Err(e) = outcome((&mut self.engine).await) {
					tracing::warn!(error = %e, "Head watcher engine failed while stopping");
				}
				ShutdownReason::Cancelled
			}
		};

		match &reason {
			ShutdownReason::Cancelled => tracing::info!("Head watcher stopped"),
			ShutdownReason::TransportFailed(e) => {
				tracing::error!(error = %e, "Head watcher stopped after a transport failure")
			}
		}
		reason
	}
}

impl Drop for HeadWatcherService {
	fn drop(&mut self) {
		self.engine.abort();
	}
}

fn outcome(
	joined: Result<Result<EngineExit, HeadWatcherError>, JoinError>,
) -> Result<EngineExit, HeadWatcherError> {
	joined.unwrap_or_else(|e| {
		Err(HeadWatcherError::engine_error(
			"Head watcher engine task failed",
			Some(Box::new(e)),
			Some(HashMap::from([(
				"task".to_string(),
				"head_watcher_engine".to_string(),
			)])),
		))
	})
}
