//! Tracker configuration loading and validation.

use async_trait::async_trait;
use std::{collections::HashMap, path::Path};

use crate::{
	models::{config::error::ConfigError, ConfigLoader, SecretValue, TrackerConfig},
	utils::constants::{DEFAULT_CONFIG_PATH, MIN_REQUEST_TIMEOUT_MS},
};

fn path_metadata(path: &Path) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(
		"path".to_string(),
		path.display().to_string(),
	)]))
}

impl TrackerConfig {
	/// Loads the tracker configuration.
	///
	/// An explicit `path` must exist. Without one, `config/tracker.json` is used when present
	/// and the built-in defaults otherwise.
	pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
		if let Some(path) = path {
			return Self::load_from_path(path).await;
		}

		let default_path = Path::new(DEFAULT_CONFIG_PATH);
		if default_path.exists() {
			return Self::load_from_path(default_path).await;
		}

		tracing::info!(
			path = DEFAULT_CONFIG_PATH,
			"No tracker config file found, using built-in defaults"
		);
		let config = Self::default().resolve_secrets().await?;
		config.validate()?;
		Ok(config)
	}
}

#[async_trait]
impl ConfigLoader for TrackerConfig {
	async fn resolve_secrets(&self) -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();
		let mut config = self.clone();

		for (field, secret) in [
			("ws_url", &mut config.ws_url),
			("rpc_url", &mut config.rpc_url),
		] {
			let resolved = secret.resolve().map_err(|e| {
				ConfigError::parse_error(
					format!("failed to resolve {}: {}", field, e),
					Some(Box::new(e)),
					None,
				)
			})?;
			*secret = SecretValue::Plain(resolved);
		}

		Ok(config)
	}

	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(
				"tracker config must be a .json file",
				None,
				path_metadata(path),
			));
		}

		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open tracker config file: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		let config: TrackerConfig = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse tracker config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		let config = config.resolve_secrets().await?;
		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.name.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Tracker name is required",
				None,
				None,
			));
		}

		if self.slug.is_empty()
			|| !self
				.slug
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
		{
			return Err(ConfigError::validation_error(
				"Slug must contain only lowercase letters, numbers, and underscores",
				None,
				Some(HashMap::from([("slug".to_string(), self.slug.clone())])),
			));
		}

		let ws_url = self.ws_url.as_str();
		if !(ws_url.starts_with("ws://") || ws_url.starts_with("wss://")) {
			return Err(ConfigError::validation_error(
				"WebSocket URL must start with ws:// or wss://",
				None,
				None,
			));
		}

		let rpc_url = self.rpc_url.as_str();
		if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
			return Err(ConfigError::validation_error(
				"RPC URL must start with http:// or https://",
				None,
				None,
			));
		}

		if self.subscription_topic.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Subscription topic must not be empty",
				None,
				None,
			));
		}

		if self.queue.capacity == 0 {
			return Err(ConfigError::validation_error(
				"Queue capacity must be greater than 0",
				None,
				None,
			));
		}

		if self.request_timeout_ms < MIN_REQUEST_TIMEOUT_MS {
			return Err(ConfigError::validation_error(
				format!(
					"Request timeout must be at least {}ms",
					MIN_REQUEST_TIMEOUT_MS
				),
				None,
				None,
			));
		}

		self.validate_protocol();

		Ok(())
	}

	fn validate_protocol(&self) {
		if self.rpc_url.as_str().starts_with("http://") {
			tracing::warn!(
				"Tracker '{}' uses an insecure RPC URL: {}",
				self.slug,
				self.rpc_url.as_str()
			);
		}
		if self.ws_url.as_str().starts_with("ws://") {
			tracing::warn!(
				"Tracker '{}' uses an insecure WebSocket URL: {}",
				self.slug,
				self.ws_url.as_str()
			);
		}
	}
}
