use std::{env, fs, path::PathBuf};

use head_tracker::{
	bootstrap::{load_config, start_head_watcher, ConfigOverrides},
	models::{ConfigError, FetchMode, OverflowPolicy},
	services::headwatcher::HeadWatcherError,
	utils::tests::builders::tracker::TrackerConfigBuilder,
};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
	let path = dir.path().join("tracker.json");
	fs::write(&path, contents).unwrap();
	path
}

#[tokio::test]
async fn test_load_config_with_environment_secrets() {
	const WS_ENV: &str = "HEAD_TRACKER_IT_WS_URL";
	const RPC_ENV: &str = "HEAD_TRACKER_IT_RPC_URL";
	env::set_var(WS_ENV, "wss://secret-node.example.com");
	env::set_var(RPC_ENV, "https://secret-node.example.com");

	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		r#"{
			"name": "OKC Testnet",
			"slug": "okc_testnet",
			"ws_url": {"type": "environment", "value": "HEAD_TRACKER_IT_WS_URL"},
			"rpc_url": {"type": "environment", "value": "HEAD_TRACKER_IT_RPC_URL"},
			"fetch_mode": "ws",
			"queue": {"capacity": 8, "overflow": "block"}
		}"#,
	);

	let config = load_config(Some(&path), &ConfigOverrides::default())
		.await
		.unwrap();

	assert_eq!(config.slug, "okc_testnet");
	assert_eq!(config.ws_url.as_str(), "wss://secret-node.example.com");
	assert_eq!(config.rpc_url.as_str(), "https://secret-node.example.com");
	assert_eq!(config.fetch_mode, FetchMode::Ws);
	assert_eq!(config.queue.capacity, 8);
	assert_eq!(config.queue.overflow, OverflowPolicy::Block);
	assert_eq!(config.subscription_topic, "newHeads");

	env::remove_var(WS_ENV);
	env::remove_var(RPC_ENV);
}

#[tokio::test]
async fn test_load_config_missing_environment_secret() {
	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		r#"{
			"name": "OKC Testnet",
			"slug": "okc_testnet",
			"ws_url": {"type": "environment", "value": "HEAD_TRACKER_IT_UNSET_WS_URL"},
			"rpc_url": {"type": "plain", "value": "https://node.example.com"}
		}"#,
	);

	let result = load_config(Some(&path), &ConfigOverrides::default()).await;
	assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[tokio::test]
async fn test_load_config_applies_overrides() {
	let dir = TempDir::new().unwrap();
	let config = TrackerConfigBuilder::new().build();
	let path = write_config(&dir, &serde_json::to_string(&config).unwrap());

	let overrides = ConfigOverrides {
		fetch_mode: Some(FetchMode::Ws),
		ws_url: Some("wss://override.example.com".to_string()),
		rpc_url: None,
	};
	let loaded = load_config(Some(&path), &overrides).await.unwrap();

	assert_eq!(loaded.fetch_mode, FetchMode::Ws);
	assert_eq!(loaded.ws_url.as_str(), "wss://override.example.com");
	assert_eq!(loaded.rpc_url.as_str(), config.rpc_url.as_str());
}

#[tokio::test]
async fn test_load_config_validates_overrides() {
	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		&serde_json::to_string(&TrackerConfigBuilder::new().build()).unwrap(),
	);

	let overrides = ConfigOverrides {
		rpc_url: Some("ftp://node.example.com".to_string()),
		..Default::default()
	};
	let result = load_config(Some(&path), &overrides).await;

	match result {
		Err(ConfigError::ValidationError(ctx)) => {
			assert!(ctx.message.contains("RPC URL"));
		}
		other => panic!("expected a validation error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_load_config_rejects_unknown_fields() {
	let dir = TempDir::new().unwrap();
	let path = write_config(
		&dir,
		r#"{
			"name": "OKC Testnet",
			"slug": "okc_testnet",
			"ws_url": {"type": "plain", "value": "wss://node.example.com"},
			"rpc_url": {"type": "plain", "value": "https://node.example.com"},
			"confirmation_blocks": 12
		}"#,
	);

	let result = load_config(Some(&path), &ConfigOverrides::default()).await;
	assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[tokio::test]
async fn test_start_head_watcher_unreachable_websocket() {
	let config = TrackerConfigBuilder::new()
		.ws_url("ws://127.0.0.1:1")
		.rpc_url("http://127.0.0.1:1")
		.build();

	match start_head_watcher(&config).await {
		Err(HeadWatcherError::StartupError(ctx)) => {
			assert_eq!(ctx.message, "Failed to connect to the WebSocket endpoint");
		}
		Err(other) => panic!("unexpected error {:?}", other),
		Ok(_) => panic!("the head watcher must not start"),
	}
}
