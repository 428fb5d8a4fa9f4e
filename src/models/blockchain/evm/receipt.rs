//! EVM receipt data structures.

use std::ops::Deref;

use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Receipt as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseReceipt {
	#[serde(rename = "transactionHash")]
	pub transaction_hash: B256,
	#[serde(rename = "transactionIndex", default)]
	pub transaction_index: Option<U64>,
	#[serde(rename = "blockHash", default)]
	pub block_hash: Option<B256>,
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<U64>,
	#[serde(default)]
	pub from: Address,
	/// `None` for contract creation
	#[serde(default)]
	pub to: Option<Address>,
	#[serde(rename = "cumulativeGasUsed", default)]
	pub cumulative_gas_used: U256,
	#[serde(rename = "gasUsed", default)]
	pub gas_used: Option<U256>,
	#[serde(rename = "contractAddress", default)]
	pub contract_address: Option<Address>,
	#[serde(default)]
	pub logs: Vec<BaseLog>,
	/// 1 for success, 0 for failure
	#[serde(default)]
	pub status: Option<U64>,
	#[serde(rename = "effectiveGasPrice", default)]
	pub effective_gas_price: Option<U256>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLog {
	pub address: Address,
	pub topics: Vec<B256>,
	pub data: Bytes,
	#[serde(rename = "logIndex", default)]
	pub log_index: Option<U256>,
	#[serde(default)]
	pub removed: Option<bool>,
}

/// Receipt of one transaction of a reconciled block.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TransactionReceipt(pub BaseReceipt);

impl TransactionReceipt {
	/// `None` when the node does not report a status (pre-Byzantium receipts)
	pub fn succeeded(&self) -> Option<bool> {
		self.0.status.map(|s| s == U64::from(1))
	}
}

impl From<BaseReceipt> for TransactionReceipt {
	fn from(receipt: BaseReceipt) -> Self {
		Self(receipt)
	}
}

impl Deref for TransactionReceipt {
	type Target = BaseReceipt;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
