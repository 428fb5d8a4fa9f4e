use crate::integration::mocks::{
	block_hash, create_evm_valid_server_mock_network_response, create_test_block,
	create_test_tracker_config_with_urls, transaction_hash, MockEVMTransportClient,
};
use head_tracker::{
	services::blockchain::{
		BlockChainClient, BlockChainError, EvmClient, EvmClientTrait, TransportError,
	},
	utils::tests::builders::evm::receipt::ReceiptBuilder,
};
use mockall::predicate;
use mockito::Server;
use serde_json::{json, Value};

fn envelope(result: Value) -> Value {
	json!({"jsonrpc": "2.0", "id": 1, "result": result})
}

#[tokio::test]
async fn test_get_latest_block_number() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(predicate::eq("eth_blockNumber"), predicate::eq(None))
		.times(1)
		.returning(|_, _| Ok(envelope(json!("0x1b4"))));

	let client = EvmClient::new_with_transport(transport);
	assert_eq!(client.get_latest_block_number().await.unwrap(), 436);
}

#[tokio::test]
async fn test_get_latest_block_number_invalid_hex() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Ok(envelope(json!("0xzz"))));

	let client = EvmClient::new_with_transport(transport);
	let err = client.get_latest_block_number().await.unwrap_err();
	assert!(err.to_string().contains("Failed to parse block number"));
}

#[tokio::test]
async fn test_get_block_by_hash() {
	let block = create_test_block(7, 2);
	let payload = serde_json::to_value(&block).unwrap();
	let hash = block_hash(7);

	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getBlockByHash"),
			predicate::function(move |params: &Option<Value>| {
				params.as_ref() == Some(&json!([format!("{:#x}", hash), true]))
			}),
		)
		.times(1)
		.returning(move |_, _| Ok(envelope(payload.clone())));

	let client = EvmClient::new_with_transport(transport);
	let fetched = client.get_block_by_hash(hash).await.unwrap();

	assert_eq!(fetched.number(), Some(7));
	assert_eq!(fetched.transaction_count(), 2);
	assert_eq!(
		fetched.transaction_hashes().collect::<Vec<_>>(),
		vec![transaction_hash(7, 0), transaction_hash(7, 1)]
	);
}

#[tokio::test]
async fn test_get_block_by_hash_not_found() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Ok(envelope(Value::Null)));

	let client = EvmClient::new_with_transport(transport);
	let err = client.get_block_by_hash(block_hash(9)).await.unwrap_err();

	assert!(matches!(
		err.downcast_ref::<BlockChainError>(),
		Some(BlockChainError::BlockNotFound(_))
	));
}

#[tokio::test]
async fn test_get_block_by_hash_malformed() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Ok(envelope(json!({"number": "not-a-number"}))));

	let client = EvmClient::new_with_transport(transport);
	let err = client.get_block_by_hash(block_hash(3)).await.unwrap_err();
	assert!(err.to_string().contains("Failed to parse block"));
}

#[tokio::test]
async fn test_get_block_by_hash_rpc_error() {
	let mut transport = MockEVMTransportClient::new();
	transport.expect_send_raw_request().returning(|method, _| {
		Err(TransportError::rpc(method, -32000, "header not found", None))
	});

	let client = EvmClient::new_with_transport(transport);
	let err = client.get_block_by_hash(block_hash(3)).await.unwrap_err();

	assert!(err.to_string().starts_with("Failed to get block"));
	match err.downcast_ref::<TransportError>() {
		Some(TransportError::Rpc { code, .. }) => assert_eq!(*code, -32000),
		other => panic!("unexpected error {:?}", other),
	}
}

#[tokio::test]
async fn test_get_transaction_receipt() {
	let hash = transaction_hash(5, 0);
	let receipt = ReceiptBuilder::new()
		.transaction_hash(hash)
		.block_hash(block_hash(5))
		.block_number(5)
		.status(true)
		.build();
	let payload = serde_json::to_value(&receipt).unwrap();

	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.with(
			predicate::eq("eth_getTransactionReceipt"),
			predicate::function(move |params: &Option<Value>| {
				params.as_ref() == Some(&json!([format!("{:#x}", hash)]))
			}),
		)
		.times(1)
		.returning(move |_, _| Ok(envelope(payload.clone())));

	let client = EvmClient::new_with_transport(transport);
	let fetched = client.get_transaction_receipt(hash).await.unwrap();

	assert_eq!(fetched.transaction_hash, hash);
	assert_eq!(fetched.block_hash, Some(block_hash(5)));
	assert_eq!(fetched.succeeded(), Some(true));
}

#[tokio::test]
async fn test_get_transaction_receipt_not_found() {
	let mut transport = MockEVMTransportClient::new();
	transport
		.expect_send_raw_request()
		.returning(|_, _| Ok(envelope(Value::Null)));

	let client = EvmClient::new_with_transport(transport);
	let err = client
		.get_transaction_receipt(transaction_hash(1, 0))
		.await
		.unwrap_err();

	assert!(matches!(
		err.downcast_ref::<BlockChainError>(),
		Some(BlockChainError::ReceiptNotFound(_))
	));
}

#[tokio::test]
async fn test_new_evm_client_over_http() {
	let mut server = Server::new_async().await;
	let connect = create_evm_valid_server_mock_network_response(&mut server);
	let block_number = server
		.mock("POST", "/")
		.match_body(mockito::Matcher::PartialJson(
			json!({"method": "eth_blockNumber"}),
		))
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x10"}"#)
		.create_async()
		.await;

	let config = create_test_tracker_config_with_urls("wss://unused.example.com", &server.url());
	let client = EvmClient::new(&config).await.unwrap();

	assert_eq!(client.get_latest_block_number().await.unwrap(), 16);
	connect.assert();
	block_number.assert();
}

#[tokio::test]
async fn test_new_evm_client_unreachable() {
	let config =
		create_test_tracker_config_with_urls("wss://unused.example.com", "http://127.0.0.1:1");
	assert!(EvmClient::new(&config).await.is_err());
}
