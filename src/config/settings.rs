// Configuration structs

use serde::{Deserialize, Serialize};

use crate::prompt::TaskType;
use crate::watch::WatchMatch;

/// File watching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Reload tracked files when they change on disk
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// How change events are matched to tracked files
    #[serde(default)]
    pub match_by: WatchMatch,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            match_by: WatchMatch::Path,
        }
    }
}

/// Directory collection configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectConfig {
    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Task type preselected at startup; unknown names mean Feature
    #[serde(default)]
    pub default_task: Option<String>,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub collect: CollectConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_task: None,
            log_level: default_log_level(),
            watch: WatchConfig::default(),
            collect: CollectConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub task: Option<String>,
    pub no_watch: bool,
    pub match_by: Option<WatchMatch>,
    pub verbose: bool,
}

impl Config {
    /// Startup task type.
    pub fn task(&self) -> TaskType {
        self.default_task
            .as_deref()
            .map(TaskType::parse)
            .unwrap_or_default()
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(task) = &overrides.task {
            self.default_task = Some(task.clone());
        }
        if overrides.no_watch {
            self.watch.enabled = false;
        }
        if let Some(match_by) = overrides.match_by {
            self.watch.match_by = match_by;
        }
        if overrides.verbose {
            self.log_level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.task(), TaskType::Feature);
        assert_eq!(config.log_level, "warn");
        assert!(config.watch.enabled);
        assert_eq!(config.watch.match_by, WatchMatch::Path);
        assert!(!config.collect.follow_symlinks);
    }

    #[test]
    fn test_unknown_default_task_is_feature() {
        let config = Config {
            default_task: Some("Chore".to_string()),
            ..Default::default()
        };
        assert_eq!(config.task(), TaskType::Feature);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config {
            default_task: Some("Blog".to_string()),
            ..Default::default()
        };
        config.apply_overrides(&Overrides {
            task: Some("fix".to_string()),
            no_watch: true,
            match_by: Some(WatchMatch::Name),
            verbose: true,
        });
        assert_eq!(config.task(), TaskType::Fix);
        assert!(!config.watch.enabled);
        assert_eq!(config.watch.match_by, WatchMatch::Name);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides::default());
        assert_eq!(config, Config::default());
    }
}
