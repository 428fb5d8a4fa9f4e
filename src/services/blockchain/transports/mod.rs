//! Network transport implementations for blockchain clients.
//!
//! - [`HttpTransportClient`]: JSON-RPC over HTTP
//! - [`EVMTransportClient`]: EVM flavoured HTTP transport
//! - [`WsTransportClient`]: JSON-RPC and pub-sub over a WebSocket connection

mod evm {
	pub mod http;
}

mod error;
mod http;
mod ws;

pub use error::TransportError;
pub use evm::http::EVMTransportClient;
pub use http::HttpTransportClient;
pub use ws::WsTransportClient;

use futures::stream::BoxStream;
use serde::Serialize;
use serde_json::{json, Value};

/// Stream of raw pub-sub notification payloads.
///
/// Yields `Err` once when the subscription fails and ends afterwards.
pub type NotificationStream = BoxStream<'static, Result<Value, TransportError>>;

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL of the endpoint this transport talks to
	async fn get_current_url(&self) -> String;

	/// Sends a JSON-RPC request and returns the response envelope.
	///
	/// The returned value always carries a `result` member. JSON-RPC error responses are
	/// returned as [`TransportError::Rpc`].
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Customizes the request for specific blockchain requirements
	async fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into())
		})
	}
}

/// Transports able to open `eth_subscribe` subscriptions
#[async_trait::async_trait]
pub trait SubscriptionTransport: Send + Sync {
	/// Subscribes to `topic` (e.g. `newHeads`) and returns the notification stream.
	async fn subscribe_raw(&self, topic: &str) -> Result<NotificationStream, TransportError>;
}

/// Turns a JSON-RPC `error` member into a [`TransportError::Rpc`].
pub(crate) fn check_rpc_error(method: &str, response: Value) -> Result<Value, TransportError> {
	match response.get("error") {
		Some(error) if !error.is_null() => {
			let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error");
			Err(TransportError::rpc(method, code, message, None))
		}
		_ => Ok(response),
	}
}
