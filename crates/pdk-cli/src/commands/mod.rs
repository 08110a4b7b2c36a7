//! Command handler modules for pdk-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod fare;
pub mod stock_demo;

use anyhow::Result;
use pdk_config::{DeskConfig, UnusedKeyPolicy, ENV_CONFIG_PATH};
use tracing::{debug, warn};

/// Resolve config layers (`--config`, else `$PDK_CONFIG`, else defaults),
/// initialise tracing from it, and return the typed config.
pub fn load_desk_config(config_paths: &[String]) -> Result<DeskConfig> {
    let mut paths: Vec<String> = config_paths.to_vec();
    if paths.is_empty() {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            if !p.trim().is_empty() {
                paths.push(p);
            }
        }
    }

    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = pdk_config::load_layered_yaml(&refs)?;

    init_tracing(&loaded.desk.logging.filter);
    debug!(config_hash = %loaded.config_hash, layers = paths.len(), "config loaded");

    let report = pdk_config::report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn)?;
    for ptr in &report.unused_leaf_pointers {
        warn!(key = %ptr, "unused config key");
    }

    Ok(loaded.desk)
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    // A second init (e.g. from tests sharing a process) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
