//! Ethereum Virtual Machine (EVM) data structures: announced headers and the canonical
//! blocks, transactions and receipts fetched to reconcile them.

mod block;
mod header;
mod receipt;
mod transaction;

pub use block::{BaseBlock as EVMBaseBlock, Block as EVMBlock};
pub use header::{Header as EVMHeader, HeaderDecodeError, EMPTY_ROOT_HASH};
pub use receipt::{
	BaseLog as EVMReceiptLog, BaseReceipt as EVMBaseReceipt,
	TransactionReceipt as EVMTransactionReceipt,
};
pub use transaction::{BaseTransaction as EVMBaseTransaction, Transaction as EVMTransaction};
