//! EVM-compatible blockchain client implementation.
//!
//! Provides the request/response side of head tracking: the latest block number, blocks by
//! hash with full transaction objects, and transaction receipts.

use std::collections::HashMap;

use alloy::primitives::B256;
use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::instrument;

use crate::{
	models::{EVMBlock, EVMTransactionReceipt, TrackerConfig},
	services::blockchain::{
		client::BlockChainClient,
		error::BlockChainError,
		transports::{BlockchainTransport, EVMTransportClient},
	},
	utils::parse_hex_quantity,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
///
/// Generic over the transport, so fetches can run over HTTP or over the WebSocket
/// connection that also carries the head subscription.
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<EVMTransportClient> {
	/// Creates a client over the HTTP endpoint configured in `config`
	pub async fn new(config: &TrackerConfig) -> Result<Self, anyhow::Error> {
		let client = EVMTransportClient::new(config).await?;
		Ok(Self::new_with_transport(client))
	}
}

/// Extended functionality specific to EVM-compatible blockchains
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Retrieves a block, including full transaction objects, by its hash
	async fn get_block_by_hash(&self, block_hash: B256) -> Result<EVMBlock, anyhow::Error>;

	/// Retrieves a transaction receipt by its hash
	async fn get_transaction_receipt(
		&self,
		transaction_hash: B256,
	) -> Result<EVMTransactionReceipt, anyhow::Error>;
}

/// Extracts the `result` member, mapping `null` to `not_found`.
fn take_result(
	mut response: Value,
	not_found: impl FnOnce() -> BlockChainError,
) -> Result<Value, anyhow::Error> {
	let result = response
		.get_mut("result")
		.map(Value::take)
		.ok_or_else(|| {
			BlockChainError::request_error("Missing 'result' field", None, None)
		})?;

	if result.is_null() {
		return Err(not_found().into());
	}

	Ok(result)
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	#[instrument(skip(self), fields(block_hash = %block_hash))]
	async fn get_block_by_hash(&self, block_hash: B256) -> Result<EVMBlock, anyhow::Error> {
		let params = json!([format!("{:#x}", block_hash), true]);

		let response = self
			.transport
			.send_raw_request("eth_getBlockByHash", Some(params))
			.await
			.with_context(|| format!("Failed to get block: {:#x}", block_hash))?;

		let block_data = take_result(response, || {
			BlockChainError::block_not_found(
				format!("{:#x}", block_hash),
				None,
				Some(HashMap::from([(
					"method".to_string(),
					"eth_getBlockByHash".to_string(),
				)])),
			)
		})?;

		serde_json::from_value(block_data)
			.with_context(|| format!("Failed to parse block: {:#x}", block_hash))
	}

	#[instrument(skip(self), fields(transaction_hash = %transaction_hash))]
	async fn get_transaction_receipt(
		&self,
		transaction_hash: B256,
	) -> Result<EVMTransactionReceipt, anyhow::Error> {
		let params = json!([format!("{:#x}", transaction_hash)]);

		let response = self
			.transport
			.send_raw_request("eth_getTransactionReceipt", Some(params))
			.await
			.with_context(|| {
				format!("Failed to get transaction receipt: {:#x}", transaction_hash)
			})?;

		let receipt_data = take_result(response, || {
			BlockChainError::receipt_not_found(format!("{:#x}", transaction_hash), None, None)
		})?;

		serde_json::from_value(receipt_data).with_context(|| "Failed to parse transaction receipt")
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for EvmClient<T> {
	#[instrument(skip(self))]
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error> {
		let response = self
			.transport
			.send_raw_request::<Value>("eth_blockNumber", None)
			.await
			.with_context(|| "Failed to get latest block number")?;

		let hex_str = response
			.get("result")
			.and_then(|v| v.as_str())
			.ok_or_else(|| anyhow::anyhow!("Missing 'result' field"))?;

		parse_hex_quantity(hex_str)
			.map_err(|e| anyhow::anyhow!("Failed to parse block number: {}", e))
	}
}
