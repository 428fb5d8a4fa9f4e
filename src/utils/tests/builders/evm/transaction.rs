use crate::models::{EVMBaseTransaction, EVMTransaction};
use alloy::primitives::{Address, B256, U256, U64};

/// A builder for creating test EVM transactions with default values.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
	hash: Option<B256>,
	from: Option<Address>,
	to: Option<Address>,
	transaction_index: Option<u64>,
}

impl TransactionBuilder {
	/// Creates a new TransactionBuilder instance.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the hash of the transaction.
	pub fn hash(mut self, hash: B256) -> Self {
		self.hash = Some(hash);
		self
	}

	/// Sets the sender address of the transaction.
	pub fn from(mut self, from: Address) -> Self {
		self.from = Some(from);
		self
	}

	/// Sets the recipient address of the transaction.
	pub fn to(mut self, to: Address) -> Self {
		self.to = Some(to);
		self
	}

	/// Sets the position of the transaction in its block.
	pub fn transaction_index(mut self, transaction_index: u64) -> Self {
		self.transaction_index = Some(transaction_index);
		self
	}

	/// Builds the Transaction instance.
	pub fn build(self) -> EVMTransaction {
		let base_tx = EVMBaseTransaction {
			hash: self.hash.unwrap_or_default(),
			from: self.from,
			to: self.to,
			gas: U256::from(21_000),
			transaction_index: self.transaction_index.map(U64::from),
			..Default::default()
		};

		EVMTransaction::from(base_tx)
	}
}
