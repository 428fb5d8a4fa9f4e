//! Constants shared across the head tracker.

/// Default WebSocket endpoint used when no configuration file is present
pub const DEFAULT_WS_URL: &str = "wss://exchainws.okex.org:8443";

/// Default HTTP JSON-RPC endpoint used when no configuration file is present
pub const DEFAULT_RPC_URL: &str = "https://exchainrpc.okex.org";

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/tracker.json";

/// Pub-sub topic announcing new block heads
pub const DEFAULT_SUBSCRIPTION_TOPIC: &str = "newHeads";

/// Default capacity of the header queue between the subscription and the engine
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Default timeout applied to JSON-RPC requests
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Lowest accepted request timeout
pub const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Default directory for file logging
pub const DEFAULT_LOG_DIR: &str = "logs/";

/// Base name of the log file, rolled by date and size
pub const DEFAULT_LOG_FILE_NAME: &str = "head-tracker.log";

/// Default log file size limit (1GiB)
pub const DEFAULT_LOG_MAX_SIZE: u64 = 1_073_741_824;

/// Default bind address of the metrics server
pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";
