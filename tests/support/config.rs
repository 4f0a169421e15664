use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use pitwall::application::dedup::{DedupConfig, EvictionPolicy};
use pitwall::infrastructure::config::settings::Config;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `contents` to a unique file in the temp dir.
pub fn write_temp_file(prefix: &str, extension: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("pitwall-{prefix}-{nanos}-{suffix}.{extension}"));
    fs::write(&path, contents).expect("write temp file");
    path
}

pub fn write_temp_config(contents: &str) -> PathBuf {
    write_temp_file("config", "toml", contents)
}

pub fn config_with_dedup(capacity: usize, eviction: EvictionPolicy) -> Config {
    Config {
        dedup: DedupConfig { capacity, eviction },
        ..Default::default()
    }
}
