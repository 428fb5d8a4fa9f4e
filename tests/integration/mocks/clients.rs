//! Mock implementations of blockchain clients.
//!
//! - [`MockEvmClientTrait`] - Mock implementation of the EVM blockchain client
//!
//! Allows testing the reconciliation engine without network connections.

use alloy::primitives::B256;
use async_trait::async_trait;
use head_tracker::{
	models::{EVMBlock, EVMTransactionReceipt},
	services::blockchain::{BlockChainClient, EvmClientTrait},
};
use mockall::mock;

mock! {
	/// Mock implementation of the EVM client trait.
	///
	/// Simulates block and receipt responses without actual network calls.
	pub EvmClientTrait {}

	impl Clone for EvmClientTrait {
		fn clone(&self) -> Self;
	}

	#[async_trait]
	impl BlockChainClient for EvmClientTrait {
		async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error>;
	}

	#[async_trait]
	impl EvmClientTrait for EvmClientTrait {
		async fn get_block_by_hash(&self, block_hash: B256) -> Result<EVMBlock, anyhow::Error>;

		async fn get_transaction_receipt(
			&self,
			transaction_hash: B256,
		) -> Result<EVMTransactionReceipt, anyhow::Error>;
	}
}
