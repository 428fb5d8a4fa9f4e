//! Bootstrap module for loading configuration and starting the head watcher.
//!
//! Wires the transports selected by [`FetchMode`] into a [`HeadWatcherService`]: the
//! WebSocket connection always carries the `newHeads` subscription, and either a separate
//! HTTP JSON-RPC client or the same WebSocket connection serves block and receipt fetches.

use std::{collections::HashMap, error::Error, path::Path};

use crate::{
	models::{ConfigError, ConfigLoader, FetchMode, SecretString, SecretValue, TrackerConfig},
	services::{
		blockchain::{
			BlockChainClient, EvmClient, EvmClientTrait, SubscriptionTransport, WsTransportClient,
		},
		headwatcher::{HeadReconciler, HeadSubscription, HeadWatcherError, HeadWatcherService},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Values given on the command line that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub fetch_mode: Option<FetchMode>,
	pub ws_url: Option<String>,
	pub rpc_url: Option<String>,
}

impl ConfigOverrides {
	pub fn is_empty(&self) -> bool {
		self.fetch_mode.is_none() && self.ws_url.is_none() && self.rpc_url.is_none()
	}

	/// Applies the overrides to `config`.
	pub fn apply(&self, config: &mut TrackerConfig) {
		if let Some(mode) = self.fetch_mode {
			config.fetch_mode = mode;
		}
		if let Some(url) = &self.ws_url {
			config.ws_url = SecretValue::Plain(SecretString::from(url.as_str()));
		}
		if let Some(url) = &self.rpc_url {
			config.rpc_url = SecretValue::Plain(SecretString::from(url.as_str()));
		}
	}
}

/// Loads the tracker configuration and applies command line overrides.
///
/// The configuration is validated again when overrides changed it.
pub async fn load_config(
	path: Option<&Path>,
	overrides: &ConfigOverrides,
) -> std::result::Result<TrackerConfig, ConfigError> {
	let mut config = TrackerConfig::load(path).await?;

	if !overrides.is_empty() {
		overrides.apply(&mut config);
		config.validate()?;
	}

	Ok(config)
}

fn startup_metadata(config: &TrackerConfig) -> Option<HashMap<String, String>> {
	Some(HashMap::from([
		("network".to_string(), config.slug.clone()),
		("mode".to_string(), config.fetch_mode.to_string()),
	]))
}

/// Connects to the configured endpoints and starts the head watcher.
///
/// # Errors
/// Returns [`HeadWatcherError::StartupError`] when an endpoint cannot be reached and
/// [`HeadWatcherError::SubscriptionError`] when the subscription is refused.
pub async fn start_head_watcher(
	config: &TrackerConfig,
) -> std::result::Result<HeadWatcherService, HeadWatcherError> {
	let ws_transport = WsTransportClient::connect(config.ws_url.as_str())
		.await
		.map_err(|e| {
			HeadWatcherError::startup_error(
				"Failed to connect to the WebSocket endpoint",
				Some(Box::new(e)),
				startup_metadata(config),
			)
		})?;

	match config.fetch_mode {
		FetchMode::Rpc => {
			let client = EvmClient::new(config).await.map_err(|e| {
				HeadWatcherError::startup_error(
					"Failed to connect to the RPC endpoint",
					Some(e.into()),
					startup_metadata(config),
				)
			})?;
			start_head_watcher_with(&ws_transport, client, config).await
		}
		FetchMode::Ws => {
			let client = EvmClient::new_with_transport(ws_transport.clone());
			start_head_watcher_with(&ws_transport, client, config).await
		}
	}
}

/// Starts the head watcher on an already connected subscription transport and client.
///
/// Logs the current chain head first; failing to read it does not prevent the start.
pub async fn start_head_watcher_with<S, C>(
	subscription_transport: &S,
	client: C,
	config: &TrackerConfig,
) -> std::result::Result<HeadWatcherService, HeadWatcherError>
where
	S: SubscriptionTransport + ?Sized,
	C: EvmClientTrait + BlockChainClient + 'static,
{
	match client.get_latest_block_number().await {
		Ok(number) => tracing::info!(
			network = %config.slug,
			number,
			mode = %config.fetch_mode,
			"Connected, latest block"
		),
		Err(e) => tracing::warn!(
			network = %config.slug,
			error = %format!("{:#}", e),
			"Failed to read the latest block number"
		),
	}

	let subscription =
		HeadSubscription::subscribe(subscription_transport, &config.subscription_topic, config.queue)
			.await?;

	Ok(HeadWatcherService::start(
		subscription,
		HeadReconciler::new(client),
	))
}
