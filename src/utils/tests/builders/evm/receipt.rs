use crate::models::{EVMBaseReceipt, EVMReceiptLog, EVMTransactionReceipt};
use alloy::primitives::{Address, B256, U256, U64};

/// A builder for creating test EVM transaction receipts with default values.
#[derive(Debug, Default)]
pub struct ReceiptBuilder {
	transaction_hash: Option<B256>,
	block_hash: Option<B256>,
	block_number: Option<u64>,
	status: Option<bool>,
	gas_used: Option<U256>,
	logs: Option<Vec<EVMReceiptLog>>,
	from: Option<Address>,
	to: Option<Address>,
	contract_address: Option<Address>,
	transaction_index: Option<u64>,
}

impl ReceiptBuilder {
	/// Creates a new ReceiptBuilder instance.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the transaction hash of the receipt.
	pub fn transaction_hash(mut self, transaction_hash: B256) -> Self {
		self.transaction_hash = Some(transaction_hash);
		self
	}

	pub fn block_hash(mut self, block_hash: B256) -> Self {
		self.block_hash = Some(block_hash);
		self
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.block_number = Some(block_number);
		self
	}

	/// Sets the status of the transaction. Default is success.
	pub fn status(mut self, status: bool) -> Self {
		self.status = Some(status);
		self
	}

	pub fn gas_used(mut self, gas_used: U256) -> Self {
		self.gas_used = Some(gas_used);
		self
	}

	pub fn transaction_index(mut self, transaction_index: u64) -> Self {
		self.transaction_index = Some(transaction_index);
		self
	}

	pub fn logs(mut self, logs: Vec<EVMReceiptLog>) -> Self {
		self.logs = Some(logs);
		self
	}

	pub fn from(mut self, from: Address) -> Self {
		self.from = Some(from);
		self
	}

	pub fn to(mut self, to: Address) -> Self {
		self.to = Some(to);
		self
	}

	/// Sets the contract address for contract creation transactions
	pub fn contract_address(mut self, contract_address: Address) -> Self {
		self.contract_address = Some(contract_address);
		self
	}

	/// Builds the TransactionReceipt instance.
	pub fn build(self) -> EVMTransactionReceipt {
		let status = if self.status.unwrap_or(true) {
			U64::from(1)
		} else {
			U64::from(0)
		};

		let base = EVMBaseReceipt {
			transaction_hash: self.transaction_hash.unwrap_or_default(),
			block_hash: self.block_hash,
			block_number: self.block_number.map(U64::from),
			status: Some(status),
			gas_used: self.gas_used,
			logs: self.logs.unwrap_or_default(),
			from: self.from.unwrap_or_default(),
			to: self.to,
			contract_address: self.contract_address,
			transaction_index: self.transaction_index.map(U64::from),
			..Default::default()
		};

		EVMTransactionReceipt::from(base)
	}
}
