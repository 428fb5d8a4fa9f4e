use std::time::Duration;

use head_tracker::services::blockchain::{
	BlockchainTransport, HttpTransportClient, TransportError,
};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

use crate::integration::mocks::create_evm_valid_server_mock_network_response;

const TIMEOUT: Duration = Duration::from_secs(2);

async fn connected_client(server: &mut Server) -> HttpTransportClient {
	let connect = create_evm_valid_server_mock_network_response(server);
	let client = HttpTransportClient::new(&server.url(), TIMEOUT, None)
		.await
		.unwrap();
	connect.assert();
	client
}

#[tokio::test]
async fn test_client_creation() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;
	assert_eq!(client.get_current_url().await, server.url());
}

#[tokio::test]
async fn test_client_creation_with_test_connection_payload() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(r#"{"id":1,"jsonrpc":"2.0","method":"web3_clientVersion","params":[]}"#)
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"Geth/v1.14"}"#)
		.create();

	let payload = r#"{"id":1,"jsonrpc":"2.0","method":"web3_clientVersion","params":[]}"#;
	let result = HttpTransportClient::new(&server.url(), TIMEOUT, Some(payload.to_string())).await;

	assert!(result.is_ok());
	mock.assert();
}

#[tokio::test]
async fn test_client_creation_invalid_url() {
	let err = HttpTransportClient::new("not a url", TIMEOUT, None)
		.await
		.unwrap_err();
	assert!(err.to_string().contains("Invalid RPC URL"));
}

#[tokio::test]
async fn test_client_creation_rejected_status() {
	let mut server = Server::new_async().await;
	let mock = server.mock("POST", "/").with_status(503).create();

	let err = HttpTransportClient::new(&server.url(), TIMEOUT, None)
		.await
		.unwrap_err();

	assert!(err.to_string().contains("503"));
	mock.assert();
}

#[tokio::test]
async fn test_send_raw_request() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;

	let mock = server
		.mock("POST", "/")
		.match_header("content-type", "application/json")
		.match_body(Matcher::Json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_getTransactionReceipt",
			"params": ["0x01"]
		})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"status":"0x1"}}"#)
		.create_async()
		.await;

	let response = client
		.send_raw_request("eth_getTransactionReceipt", Some(json!(["0x01"])))
		.await
		.unwrap();

	assert_eq!(response["result"]["status"], "0x1");
	mock.assert();
}

#[tokio::test]
async fn test_send_raw_request_without_params() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;

	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"method": "eth_blockNumber",
			"params": null
		})))
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#)
		.create_async()
		.await;

	let response = client
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
		.unwrap();

	assert_eq!(response["result"], "0x2a");
	mock.assert();
}

#[tokio::test]
async fn test_send_raw_request_rpc_error() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;

	server
		.mock("POST", "/")
		.with_status(200)
		.with_body(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument 0"}}"#,
		)
		.create_async()
		.await;

	match client
		.send_raw_request("eth_getBlockByHash", Some(json!(["0x", true])))
		.await
	{
		Err(TransportError::Rpc { code, message, .. }) => {
			assert_eq!(code, -32602);
			assert_eq!(message, "invalid argument 0");
		}
		other => panic!("expected an RPC error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_send_raw_request_http_error() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;

	server
		.mock("POST", "/")
		.with_status(500)
		.with_body("upstream unavailable")
		.create_async()
		.await;

	match client
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await
	{
		Err(TransportError::Http {
			status_code, body, ..
		}) => {
			assert_eq!(status_code.as_u16(), 500);
			assert_eq!(body, "upstream unavailable");
		}
		other => panic!("expected an HTTP error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_send_raw_request_invalid_json() {
	let mut server = Server::new_async().await;
	let client = connected_client(&mut server).await;

	server
		.mock("POST", "/")
		.with_status(200)
		.with_body("{not json")
		.create_async()
		.await;

	let result = client
		.send_raw_request::<Value>("eth_blockNumber", None)
		.await;
	assert!(matches!(result, Err(TransportError::ResponseParse(_))));
}
