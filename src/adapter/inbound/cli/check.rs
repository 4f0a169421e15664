//! `pitwall check`: validate configuration.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::infrastructure::config::settings::Config;

/// Print the validated configuration.
pub fn execute(path: &Path, config: &Config, as_json: bool) {
    if as_json {
        output::json(&json!({
            "config": path.display().to_string(),
            "cache_ttl_secs": config.cache.ttl_secs,
            "dedup": config.dedup,
            "retry": config.retry,
        }));
        return;
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration is valid");

    output::section("Cache TTLs");
    for namespace in config.cache.namespaces() {
        if let Some(ttl) = config.cache.ttl(namespace) {
            output::field(namespace, format!("{}s", ttl.as_secs()));
        }
    }

    output::section("Delivery Dedup");
    output::field("Capacity", config.dedup.capacity);
    output::field("Eviction", format!("{:?}", config.dedup.eviction));

    output::section("Retry");
    output::field("Max attempts", config.retry.max_attempts);
    output::field("Initial delay", format!("{}ms", config.retry.initial_delay_ms));
    output::field("Max delay", format!("{}ms", config.retry.max_delay_ms));
}
