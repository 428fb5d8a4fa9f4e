use serde::{Deserialize, Serialize};

use crate::{
	models::{SecretString, SecretValue},
	utils::constants::{
		DEFAULT_QUEUE_CAPACITY, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_RPC_URL,
		DEFAULT_SUBSCRIPTION_TOPIC, DEFAULT_WS_URL,
	},
	utils::normalize_string,
};

/// Configuration of a head tracker instance.
///
/// Loaded from `config/tracker.json` when present. Every field except the endpoints has a
/// default, and the endpoints themselves default to the public OKC gateways.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
	/// Human-readable name of the tracked network
	pub name: String,

	/// Unique identifier used in logs and metrics labels
	pub slug: String,

	/// WebSocket endpoint used for the `newHeads` subscription
	pub ws_url: SecretValue,

	/// HTTP JSON-RPC endpoint used for fetches in [`FetchMode::Rpc`]
	pub rpc_url: SecretValue,

	/// Which connection serves block and receipt fetches
	#[serde(default)]
	pub fetch_mode: FetchMode,

	/// Pub-sub topic to subscribe to
	#[serde(default = "default_subscription_topic")]
	pub subscription_topic: String,

	/// Header queue between the subscription and the reconciliation engine
	#[serde(default)]
	pub queue: QueueConfig,

	/// Timeout applied to every JSON-RPC request
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
}

/// Selects the connection used for fetching blocks and receipts.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
	/// Fetch over a dedicated HTTP JSON-RPC connection
	#[default]
	Rpc,
	/// Reuse the subscription's WebSocket connection for fetches
	Ws,
}

impl std::str::FromStr for FetchMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match normalize_string(s).as_str() {
			"rpc" => Ok(FetchMode::Rpc),
			"ws" => Ok(FetchMode::Ws),
			other => Err(format!("unknown fetch mode '{}', expected 'rpc' or 'ws'", other)),
		}
	}
}

impl std::fmt::Display for FetchMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FetchMode::Rpc => write!(f, "rpc"),
			FetchMode::Ws => write!(f, "ws"),
		}
	}
}

/// What happens when a header arrives while the queue is full.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
	/// Evict the oldest queued header to make room
	#[default]
	DropOldest,
	/// Wait until the engine frees a slot
	Block,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
	#[serde(default = "default_queue_capacity")]
	pub capacity: usize,

	#[serde(default)]
	pub overflow: OverflowPolicy,
}

impl Default for QueueConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_QUEUE_CAPACITY,
			overflow: OverflowPolicy::default(),
		}
	}
}

impl Default for TrackerConfig {
	fn default() -> Self {
		Self {
			name: "OKC Mainnet".to_string(),
			slug: "okc_mainnet".to_string(),
			ws_url: SecretValue::Plain(SecretString::from(DEFAULT_WS_URL)),
			rpc_url: SecretValue::Plain(SecretString::from(DEFAULT_RPC_URL)),
			fetch_mode: FetchMode::default(),
			subscription_topic: default_subscription_topic(),
			queue: QueueConfig::default(),
			request_timeout_ms: default_request_timeout_ms(),
		}
	}
}

fn default_subscription_topic() -> String {
	DEFAULT_SUBSCRIPTION_TOPIC.to_string()
}

fn default_request_timeout_ms() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_queue_capacity() -> usize {
	DEFAULT_QUEUE_CAPACITY
}
