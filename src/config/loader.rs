// Configuration loader
// Reads ~/.quill/config.toml (or an explicit path); a missing file means defaults

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::settings::Config;

/// Default location of the config file, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quill").join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist. The default path may be absent, in which
/// case defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_from(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_from(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn load_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse TOML config text.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}
