//! Head tracker entry point.
//!
//! Subscribes to `newHeads` on an EVM node and reconciles every announced header with the
//! block and receipts fetched over JSON-RPC, until Ctrl+C or a transport failure.
//!
//! # Flow
//! 1. Loads `.env`, applies command line options and sets up logging
//! 2. Loads the tracker configuration (file or built-in defaults)
//! 3. Connects the WebSocket endpoint and, in `rpc` mode, the HTTP endpoint
//! 4. Starts the head watcher and the optional metrics server
//! 5. Stops on Ctrl+C; exits with an error after a transport failure

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{load_config, start_head_watcher, ConfigOverrides, Result},
	models::FetchMode,
	services::headwatcher::ShutdownReason,
	utils::{
		constants::DEFAULT_METRICS_ADDRESS, logging::setup_logging,
		metrics::server::create_metrics_server, parse_string_to_bytes_size,
	},
};

use clap::Parser;
use dotenvy::dotenv_override;
use std::env::{set_var, var};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
	name = "head-tracker",
	about = "Tracks the head of an EVM network over a newHeads subscription and reconciles every header with the canonical block and its receipts.",
	version
)]
struct Cli {
	/// Connection serving block and receipt fetches: `rpc` (HTTP) or `ws` (the subscription socket)
	#[arg(value_name = "MODE")]
	mode: Option<FetchMode>,

	/// Path to the tracker configuration file (default: config/tracker.json)
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// WebSocket endpoint, overrides the configuration file
	#[arg(long, value_name = "URL")]
	ws_url: Option<String>,

	/// HTTP JSON-RPC endpoint, overrides the configuration file
	#[arg(long, value_name = "URL")]
	rpc_url: Option<String>,

	/// Write logs to file instead of stdout
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	/// Address to start the metrics server on (default: 127.0.0.1:8081)
	#[arg(long, value_name = "HOST:PORT")]
	metrics_address: Option<String>,

	/// Enable metrics server
	#[arg(long)]
	metrics: bool,

	/// Validate the configuration without starting the service
	#[arg(long)]
	check: bool,
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		// Set log level from RUST_LOG if it exists
		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}

		if self.metrics {
			set_var("METRICS_ENABLED", "true");
		}

		// Extract port from address if it's in HOST:PORT format
		if let Some(port) = self
			.metrics_address
			.as_deref()
			.and_then(|address| address.split(':').nth(1))
		{
			set_var("METRICS_PORT", port);
		}
	}

	fn overrides(&self) -> ConfigOverrides {
		ConfigOverrides {
			fetch_mode: self.mode,
			ws_url: self.ws_url.clone(),
			rpc_url: self.rpc_url.clone(),
		}
	}

	fn metrics_enabled(&self) -> bool {
		self.metrics || var("METRICS_ENABLED").map(|v| v == "true").unwrap_or(false)
	}

	fn metrics_address(&self) -> String {
		if var("IN_DOCKER").unwrap_or_default() == "true" {
			var("METRICS_PORT")
				.map(|port| format!("0.0.0.0:{}", port))
				.unwrap_or_else(|_| "0.0.0.0:8081".to_string())
		} else {
			self.metrics_address
				.clone()
				.unwrap_or_else(|| DEFAULT_METRICS_ADDRESS.to_string())
		}
	}
}

/// Main entry point for the head tracker.
///
/// # Errors
/// Returns an error if the configuration is invalid, if an endpoint cannot be reached at
/// startup, or if the subscription fails while running.
#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let overrides = cli.overrides();

	if cli.check {
		validate_configuration(cli.config.as_deref(), &overrides).await;
		return Ok(());
	}

	let config = load_config(cli.config.as_deref(), &overrides)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

	info!(
		network = %config.name,
		mode = %config.fetch_mode,
		topic = %config.subscription_topic,
		"Starting head tracker"
	);

	let metrics_server = if cli.metrics_enabled() {
		let metrics_address = cli.metrics_address();
		info!("Metrics server enabled, starting on {}", metrics_address);

		match create_metrics_server(metrics_address) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let service = start_head_watcher(&config).await?;

	info!("Service started. Press Ctrl+C to shutdown");

	let cancel = async move {
		match metrics_server {
			Some(metrics_future) => {
				tokio::select! {
					result = tokio::signal::ctrl_c() => {
						if let Err(e) = result {
							error!("Error waiting for Ctrl+C: {}", e);
						}
						info!("Shutdown signal received, stopping services...");
					}
					result = metrics_future => {
						if let Err(e) = result {
							error!("Metrics server error: {}", e);
						}
						info!("Metrics server stopped, shutting down services...");
					}
				}
			}
			None => {
				if let Err(e) = tokio::signal::ctrl_c().await {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping services...");
			}
		}
	};

	match service.wait_for_shutdown(cancel).await {
		ShutdownReason::Cancelled => {
			info!("Shutdown complete");
			Ok(())
		}
		ShutdownReason::TransportFailed(e) => {
			error!("Head tracker stopped: {}", e);
			Err(e.into())
		}
	}
}

/// Validates the configuration without connecting to any endpoint.
async fn validate_configuration(path: Option<&Path>, overrides: &ConfigOverrides) {
	info!("Validating configuration...");

	match load_config(path, overrides).await {
		Ok(config) => {
			info!("✓ Tracker '{}' ({}) is valid", config.name, config.slug);
			info!("✓ Fetch mode: {}", config.fetch_mode);
			info!(
				"✓ Header queue: capacity {}, overflow {:?}",
				config.queue.capacity, config.queue.overflow
			);
			info!("Configuration validation completed successfully!");
		}
		Err(e) => {
			error!("{}", e);
		}
	}
}
