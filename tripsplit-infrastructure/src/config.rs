use anyhow::{Context, Result};
use std::{fs, path::Path};
use tripsplit_application::TripConfig;

pub const DEFAULT_CONFIG_PATH: &str = "tripsplit.json";

/// Loads the trip configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TripConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading config file: {}", path.display()))?;
    let config: TripConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing config JSON in {}", path.display()))?;
    Ok(config)
}

/// An explicit path must load. Without one, `tripsplit.json` in the current
/// directory is used when present, otherwise the default configuration.
pub fn load_config_with_fallback(path: Option<&Path>) -> Result<TripConfig> {
    if let Some(config_path) = path {
        return load_config(config_path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.is_file() {
        return load_config(default_path);
    }
    tracing::debug!("No config file found, using defaults");
    Ok(TripConfig::default())
}
