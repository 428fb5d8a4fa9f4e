//! EVM transaction data structures.

use std::{collections::HashMap, ops::Deref};

use alloy::primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Transaction object as returned inside `eth_getBlockByHash(hash, true)`.
///
/// Only `hash` is required. Chains add their own fields to transaction objects, so
/// everything else is lenient and unknown keys are kept in `extra`.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct BaseTransaction {
	pub hash: B256,
	#[serde(default)]
	pub nonce: U256,
	#[serde(rename = "blockHash", default)]
	pub block_hash: Option<B256>,
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<U64>,
	#[serde(rename = "transactionIndex", default)]
	pub transaction_index: Option<U64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from: Option<Address>,
	#[serde(default)]
	pub to: Option<Address>,
	#[serde(default)]
	pub value: U256,
	#[serde(rename = "gasPrice", default)]
	pub gas_price: Option<U256>,
	#[serde(default)]
	pub gas: U256,
	#[serde(default)]
	pub input: Bytes,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub transaction_type: Option<U64>,

	#[serde(flatten)]
	pub extra: HashMap<String, serde_json::Value>,
}

/// Wrapper around [`BaseTransaction`]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Transaction(pub BaseTransaction);

impl Transaction {
	pub fn hash(&self) -> &B256 {
		&self.0.hash
	}

	pub fn sender(&self) -> Option<&Address> {
		self.0.from.as_ref()
	}

	pub fn to(&self) -> Option<&Address> {
		self.0.to.as_ref()
	}
}

impl From<BaseTransaction> for Transaction {
	fn from(tx: BaseTransaction) -> Self {
		Self(tx)
	}
}

impl Deref for Transaction {
	type Target = BaseTransaction;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
