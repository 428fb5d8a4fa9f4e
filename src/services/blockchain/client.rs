//! Core blockchain client interface.

use async_trait::async_trait;

/// Chain-agnostic client operations
#[async_trait]
pub trait BlockChainClient: Send + Sync + Clone {
	/// Retrieves the latest block number from the blockchain
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error>;
}
