//! Plugin runtime configuration.

use serde::{Deserialize, Serialize};

/// Plugin runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Base directory containing plugin script libraries. Script paths from
    /// the manifest are resolved relative to this directory.
    #[serde(default = "default_plugin_directory")]
    pub directory: String,
    /// Path to the plugin manifest describing which plugins to load.
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Whether to automatically load plugins on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            directory: default_plugin_directory(),
            manifest: default_manifest(),
            auto_load: default_true(),
        }
    }
}

fn default_plugin_directory() -> String {
    "./plugins".to_string()
}

fn default_manifest() -> String {
    "config/plugins.toml".to_string()
}

fn default_true() -> bool {
    true
}
