use crate::properties::strategies::header_fields_strategy;

use alloy::primitives::{Address, U256};
use head_tracker::models::{EVMHeader, HeaderDecodeError};
use proptest::{prelude::*, test_runner::Config};

const MANDATORY_FIELDS: [&str; 13] = [
	"parentHash",
	"sha3Uncles",
	"hash",
	"stateRoot",
	"transactionsRoot",
	"receiptsRoot",
	"logsBloom",
	"difficulty",
	"number",
	"gasLimit",
	"gasUsed",
	"timestamp",
	"extraData",
];

const DEFAULTED_FIELDS: [&str; 3] = ["miner", "mixHash", "nonce"];

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_decode_preserves_fields(fields in header_fields_strategy()) {
		let header = EVMHeader::decode(fields.to_json()).unwrap();

		prop_assert_eq!(header.hash, fields.hash);
		prop_assert_eq!(header.parent_hash, fields.parent_hash);
		prop_assert_eq!(header.number, U256::from(fields.number));
		prop_assert_eq!(header.number_u64(), fields.number);
		prop_assert_eq!(header.miner, fields.miner);
		prop_assert_eq!(header.transactions_root, fields.transactions_root);
		prop_assert_eq!(header.timestamp, fields.timestamp);
		prop_assert_eq!(header.gas_used, fields.gas_used);
		prop_assert_eq!(header.extra_data.to_vec(), fields.extra_data.clone());
		prop_assert_eq!(header.base_fee_per_gas, fields.base_fee_per_gas.map(U256::from));
	}

	#[test]
	fn test_decode_from_bytes_matches_value(fields in header_fields_strategy()) {
		let payload = fields.to_json();
		let bytes = serde_json::to_vec(&payload).unwrap();

		let from_value = EVMHeader::decode(payload).unwrap();
		let from_bytes = EVMHeader::from_slice(&bytes).unwrap();
		prop_assert_eq!(from_value, from_bytes);
	}

	#[test]
	fn test_missing_mandatory_field_is_reported(
		fields in header_fields_strategy(),
		index in 0..MANDATORY_FIELDS.len(),
		as_null in any::<bool>(),
	) {
		let field = MANDATORY_FIELDS[index];
		let mut payload = fields.to_json();
		let object = payload.as_object_mut().unwrap();
		if as_null {
			object.insert(field.to_string(), serde_json::Value::Null);
		} else {
			object.remove(field);
		}

		match EVMHeader::decode(payload) {
			Err(HeaderDecodeError::MissingField(missing)) => prop_assert_eq!(missing, field),
			other => prop_assert!(false, "expected MissingField({}), got {:?}", field, other),
		}
	}

	#[test]
	fn test_optional_fields_default_to_zero(
		fields in header_fields_strategy(),
		index in 0..DEFAULTED_FIELDS.len(),
	) {
		let mut payload = fields.to_json();
		payload.as_object_mut().unwrap().remove(DEFAULTED_FIELDS[index]);

		let header = EVMHeader::decode(payload).unwrap();
		match DEFAULTED_FIELDS[index] {
			"miner" => prop_assert_eq!(header.miner, Address::ZERO),
			"mixHash" => prop_assert!(header.mix_hash.is_zero()),
			_ => prop_assert!(header.nonce.is_zero()),
		}
	}

	#[test]
	fn test_empty_root_detection(fields in header_fields_strategy()) {
		let header = EVMHeader::decode(fields.to_json()).unwrap();
		prop_assert_eq!(
			header.has_empty_transactions_root(),
			fields.transactions_root.is_zero()
				|| fields.transactions_root == head_tracker::models::EMPTY_ROOT_HASH
		);
	}

	#[test]
	fn test_non_object_payload_is_malformed(value in prop_oneof![
		any::<i64>().prop_map(serde_json::Value::from),
		".{0,16}".prop_map(serde_json::Value::from),
		Just(serde_json::Value::Null),
	]) {
		prop_assert!(matches!(
			EVMHeader::decode(value),
			Err(HeaderDecodeError::Malformed(_))
		));
	}
}
