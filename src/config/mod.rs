// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{default_config_path, load_config, parse_config};
pub use settings::{CollectConfig, Config, Overrides, WatchConfig};
