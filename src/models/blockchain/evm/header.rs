//! EVM block header as announced by `newHeads` notifications.
//!
//! Nodes differ in which header fields they include. Fields required to reconcile a head
//! against the canonical block must be present and non-null. `miner`, `mixHash` and `nonce`
//! fall back to zero values, and `baseFeePerGas` is only set for post-London headers.

use alloy::primitives::{b256, Address, Bloom, Bytes, B256, B64, U256, U64};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Root of an empty Merkle-Patricia trie, i.e. the transactions root of a block without
/// transactions.
pub const EMPTY_ROOT_HASH: B256 =
	b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Errors produced while decoding a header payload.
#[derive(ThisError, Debug)]
pub enum HeaderDecodeError {
	/// A mandatory field is absent or `null`. Carries the wire name of the field.
	#[error("missing required field '{0}' for Header")]
	MissingField(&'static str),

	/// The payload is not an object, or a field has an invalid encoding.
	#[error("malformed header: {0}")]
	Malformed(#[from] serde_json::Error),
}

impl HeaderDecodeError {
	/// Wire name of the missing field, if that is what failed.
	pub fn missing_field(&self) -> Option<&'static str> {
		match self {
			Self::MissingField(field) => Some(field),
			Self::Malformed(_) => None,
		}
	}
}

/// Header payload with every field optional, so absence can be reported per field.
#[derive(Debug, Default, Deserialize)]
struct RawHeader {
	#[serde(rename = "parentHash")]
	parent_hash: Option<B256>,
	#[serde(rename = "sha3Uncles")]
	uncles_hash: Option<B256>,
	hash: Option<B256>,
	miner: Option<Address>,
	#[serde(rename = "stateRoot")]
	state_root: Option<B256>,
	#[serde(rename = "transactionsRoot")]
	transactions_root: Option<B256>,
	#[serde(rename = "receiptsRoot")]
	receipts_root: Option<B256>,
	#[serde(rename = "logsBloom")]
	logs_bloom: Option<Bloom>,
	difficulty: Option<U256>,
	number: Option<U256>,
	#[serde(rename = "gasLimit")]
	gas_limit: Option<U64>,
	#[serde(rename = "gasUsed")]
	gas_used: Option<U64>,
	timestamp: Option<U64>,
	#[serde(rename = "extraData")]
	extra_data: Option<Bytes>,
	#[serde(rename = "mixHash")]
	mix_hash: Option<B256>,
	nonce: Option<B64>,
	#[serde(rename = "baseFeePerGas")]
	base_fee_per_gas: Option<U256>,
}

/// A decoded block header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawHeader")]
pub struct Header {
	#[serde(rename = "parentHash")]
	pub parent_hash: B256,
	#[serde(rename = "sha3Uncles")]
	pub uncles_hash: B256,
	pub hash: B256,
	/// Block proposer, zero when the node omits it
	pub miner: Address,
	#[serde(rename = "stateRoot")]
	pub state_root: B256,
	#[serde(rename = "transactionsRoot")]
	pub transactions_root: B256,
	#[serde(rename = "receiptsRoot")]
	pub receipts_root: B256,
	#[serde(rename = "logsBloom")]
	pub logs_bloom: Bloom,
	pub difficulty: U256,
	pub number: U256,
	#[serde(rename = "gasLimit", serialize_with = "quantity::serialize")]
	pub gas_limit: u64,
	#[serde(rename = "gasUsed", serialize_with = "quantity::serialize")]
	pub gas_used: u64,
	#[serde(serialize_with = "quantity::serialize")]
	pub timestamp: u64,
	#[serde(rename = "extraData")]
	pub extra_data: Bytes,
	#[serde(rename = "mixHash")]
	pub mix_hash: B256,
	pub nonce: B64,
	#[serde(rename = "baseFeePerGas", skip_serializing_if = "Option::is_none")]
	pub base_fee_per_gas: Option<U256>,
}

/// Serializes `u64` fields as hex quantities, matching the JSON-RPC wire format.
mod quantity {
	use alloy::primitives::U64;
	use serde::Serializer;

	pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
		serde::Serialize::serialize(&U64::from(*value), serializer)
	}
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, HeaderDecodeError> {
	value.ok_or(HeaderDecodeError::MissingField(field))
}

impl TryFrom<RawHeader> for Header {
	type Error = HeaderDecodeError;

	fn try_from(raw: RawHeader) -> Result<Self, Self::Error> {
		Ok(Self {
			parent_hash: required(raw.parent_hash, "parentHash")?,
			uncles_hash: required(raw.uncles_hash, "sha3Uncles")?,
			hash: required(raw.hash, "hash")?,
			miner: raw.miner.unwrap_or(Address::ZERO),
			state_root: required(raw.state_root, "stateRoot")?,
			transactions_root: required(raw.transactions_root, "transactionsRoot")?,
			receipts_root: required(raw.receipts_root, "receiptsRoot")?,
			logs_bloom: required(raw.logs_bloom, "logsBloom")?,
			difficulty: required(raw.difficulty, "difficulty")?,
			number: required(raw.number, "number")?,
			gas_limit: required(raw.gas_limit, "gasLimit")?.to::<u64>(),
			gas_used: required(raw.gas_used, "gasUsed")?.to::<u64>(),
			timestamp: required(raw.timestamp, "timestamp")?.to::<u64>(),
			extra_data: required(raw.extra_data, "extraData")?,
			mix_hash: raw.mix_hash.unwrap_or(B256::ZERO),
			nonce: raw.nonce.unwrap_or(B64::ZERO),
			base_fee_per_gas: raw.base_fee_per_gas,
		})
	}
}

impl Header {
	/// Decodes the `result` object of a `newHeads` notification.
	pub fn decode(value: serde_json::Value) -> Result<Self, HeaderDecodeError> {
		let raw: RawHeader = serde_json::from_value(value)?;
		raw.try_into()
	}

	/// Decodes a header from raw JSON bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, HeaderDecodeError> {
		let raw: RawHeader = serde_json::from_slice(bytes)?;
		raw.try_into()
	}

	/// Whether the transactions root marks a block without transactions.
	///
	/// Both the zero hash (used by some nodes for empty blocks) and the canonical empty trie
	/// root are accepted.
	pub fn has_empty_transactions_root(&self) -> bool {
		self.transactions_root == B256::ZERO || self.transactions_root == EMPTY_ROOT_HASH
	}

	/// Block number saturated into a `u64`, for logs and gauges.
	pub fn number_u64(&self) -> u64 {
		self.number.saturating_to::<u64>()
	}
}
