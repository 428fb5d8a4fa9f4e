//! Reconciliation engine.
//!
//! Every announced header is checked against the canonical block fetched by its hash, then
//! the receipts of the block's transactions are fetched one after the other. Failures are
//! logged and scoped to the header; only the subscription's terminal error stops the
//! engine.

use std::collections::HashMap;

use alloy::primitives::B256;
use tokio::sync::watch;
use tracing::instrument;

use crate::{
	models::EVMHeader,
	services::{
		blockchain::EvmClientTrait,
		headwatcher::{
			error::{HeadWatcherError, ReconcileError},
			subscription::HeadSubscription,
		},
	},
	utils::metrics::{
		BLOCKS_FETCHED, BLOCK_FETCH_FAILURES, CONSISTENCY_ERRORS, RECEIPTS_FETCHED,
		RECEIPT_FETCH_FAILURES,
	},
};

/// Outcome of a successful reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
	pub header_number: u64,
	pub header_hash: B256,
	/// Number reported by the fetched block, `None` if the node omitted it
	pub block_number: Option<u64>,
	pub transaction_count: usize,
	pub receipts_fetched: usize,
	pub receipts_failed: usize,
}

/// Lifecycle of the engine task. `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
	Running,
	Terminated,
}

/// Why the engine stopped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineExit {
	Cancelled,
}

/// Reconciles announced headers against the data served by an EVM client
#[derive(Debug)]
pub struct HeadReconciler<C> {
	client: C,
}

impl<C: EvmClientTrait> HeadReconciler<C> {
	pub fn new(client: C) -> Self {
		Self { client }
	}

	/// Runs one reconciliation pass for `header`.
	///
	/// # Errors
	/// * [`ReconcileError::BlockFetch`] when the block cannot be fetched
	/// * [`ReconcileError::Consistency`] when the block has no transactions although the
	///   header announces a non-empty transactions root; no receipt is fetched then
	///
	/// Receipt failures are counted in the report and do not fail the pass.
	#[instrument(skip_all, fields(number = header.number_u64(), hash = %header.hash))]
	pub async fn reconcile(&self, header: &EVMHeader) -> Result<ReconcileReport, ReconcileError> {
		let metadata = || {
			Some(HashMap::from([
				("number".to_string(), header.number_u64().to_string()),
				("hash".to_string(), format!("{:#x}", header.hash)),
			]))
		};

		tracing::info!("New head");

		let block = match self.client.get_block_by_hash(header.hash).await {
			Ok(block) => block,
			Err(e) => {
				BLOCK_FETCH_FAILURES.inc();
				return Err(ReconcileError::block_fetch(
					format!("Failed to fetch block {:#x}", header.hash),
					Some(e.into()),
					metadata(),
				));
			}
		};
		BLOCKS_FETCHED.inc();

		let mut report = ReconcileReport {
			header_number: header.number_u64(),
			header_hash: header.hash,
			block_number: block.number(),
			transaction_count: block.transaction_count(),
			receipts_fetched: 0,
			receipts_failed: 0,
		};

		tracing::info!(
			block_number = report.block_number,
			txs = report.transaction_count,
			"Fetched block"
		);

		if report.transaction_count == 0 {
			if header.has_empty_transactions_root() {
				return Ok(report);
			}

			CONSISTENCY_ERRORS.inc();
			return Err(ReconcileError::consistency(
				format!(
					"Block has no transactions but the header announces transactions root {:#x}",
					header.transactions_root
				),
				None,
				metadata(),
			));
		}

		let transaction_hashes: Vec<B256> = block.transaction_hashes().collect();
		for transaction_hash in transaction_hashes {
			match self.client.get_transaction_receipt(transaction_hash).await {
				Ok(receipt) => {
					RECEIPTS_FETCHED.inc();
					report.receipts_fetched += 1;
					tracing::debug!(
						tx = %transaction_hash,
						status = ?receipt.succeeded(),
						"Fetched receipt"
					);
				}
				Err(e) => {
					RECEIPT_FETCH_FAILURES.inc();
					report.receipts_failed += 1;
					tracing::warn!(
						tx = %transaction_hash,
						error = %format!("{:#}", e),
						"Failed to fetch receipt"
					);
				}
			}
		}

		if report.receipts_failed > 0 {
			tracing::warn!(
				fetched = report.receipts_fetched,
				failed = report.receipts_failed,
				"Block reconciled with missing receipts"
			);
		}

		Ok(report)
	}
}

/// Resolves once shutdown is requested or the sending side is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
	let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Processes headers one at a time, in arrival order, until cancelled or until the
/// subscription terminates. A terminal error stops the engine before any header still
/// queued behind it.
///
/// # Arguments
/// * `subscription` - Source of decoded headers
/// * `reconciler` - Reconciler applied to every header
/// * `shutdown` - Set to `true` to cancel the engine, also while a pass is in flight
/// * `state` - Receives `Running` on start and `Terminated` on exit
///
/// # Returns
/// * `Ok(EngineExit::Cancelled)` after cancellation
/// * `Err(HeadWatcherError)` with the subscription's terminal error
pub async fn run_engine<C: EvmClientTrait>(
	mut subscription: HeadSubscription,
	reconciler: HeadReconciler<C>,
	mut shutdown: watch::Receiver<bool>,
	state: watch::Sender<EngineState>,
) -> Result<EngineExit, HeadWatcherError> {
	state.send_replace(EngineState::Running);
	tracing::info!(topic = subscription.topic(), "Head watcher engine started");

	let result = loop {
		let next = tokio::select! {
			biased;
			_ = shutdown_requested(&mut shutdown) => break Ok(EngineExit::Cancelled),
			next = subscription.next_header() => next,
		};

		let header = match next {
			Ok(header) => header,
			Err(e) => break Err(e),
		};

		tokio::select! {
			biased;
			_ = shutdown_requested(&mut shutdown) => break Ok(EngineExit::Cancelled),
			result = reconciler.reconcile(&header) => {
				if let Ok(report) = result {
					tracing::debug!(
						number = report.header_number,
						receipts = report.receipts_fetched,
						"Header reconciled"
					);
				}
			}
		}
	};

	state.send_replace(EngineState::Terminated);
	match &result {
		Ok(exit) => tracing::info!(?exit, "Head watcher engine stopped"),
		Err(e) => tracing::error!(error = %e, "Head watcher engine terminated"),
	}
	result
}
