//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

use crate::config::NodeConfig;

/// Initialize the tracing subscriber from the node config.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_tracing(config: &NodeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
