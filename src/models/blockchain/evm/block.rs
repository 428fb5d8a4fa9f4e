//! EVM block data structures.

use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::EVMTransaction;

/// Block as returned by `eth_getBlockByHash(hash, true)`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct BaseBlock<TX> {
	/// Hash of the block, `None` if pending
	pub hash: Option<B256>,
	#[serde(rename = "parentHash")]
	pub parent_hash: B256,
	#[serde(rename = "miner", default)]
	pub author: Address,
	#[serde(rename = "stateRoot")]
	pub state_root: B256,
	#[serde(rename = "transactionsRoot")]
	pub transactions_root: B256,
	#[serde(rename = "receiptsRoot")]
	pub receipts_root: B256,
	/// Block number, `None` if pending
	pub number: Option<U64>,
	#[serde(rename = "gasUsed")]
	pub gas_used: U256,
	#[serde(rename = "gasLimit", default)]
	pub gas_limit: U256,
	#[serde(rename = "baseFeePerGas", skip_serializing_if = "Option::is_none")]
	pub base_fee_per_gas: Option<U256>,
	#[serde(rename = "extraData", default)]
	pub extra_data: Bytes,
	pub timestamp: U256,
	#[serde(default)]
	pub difficulty: U256,
	#[serde(default)]
	pub transactions: Vec<TX>,
	#[serde(default)]
	pub size: Option<U256>,
}

/// Canonical block record fetched for an announced head.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Block(pub BaseBlock<EVMTransaction>);

impl Block {
	/// Block number, `None` for pending blocks
	pub fn number(&self) -> Option<u64> {
		self.0.number.map(|n| n.to())
	}

	pub fn transaction_count(&self) -> usize {
		self.0.transactions.len()
	}

	/// Transaction hashes in block order
	pub fn transaction_hashes(&self) -> impl Iterator<Item = B256> + '_ {
		self.0.transactions.iter().map(|tx| *tx.hash())
	}
}

impl From<BaseBlock<EVMTransaction>> for Block {
	fn from(block: BaseBlock<EVMTransaction>) -> Self {
		Self(block)
	}
}

impl Deref for Block {
	type Target = BaseBlock<EVMTransaction>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
