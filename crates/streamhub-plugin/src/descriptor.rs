//! Plugin and script descriptors.
//!
//! Descriptors are produced by the host's discovery layer (a manifest file or
//! a remote configuration endpoint) and are immutable once a plugin has been
//! loaded. The runtime only uses them for capability scoping and error
//! attribution.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Kind of installed plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginType {
    /// A regular plugin extending client behavior.
    #[default]
    Regular,
    /// A theme; loaded through the same pipeline but typically only styles
    /// the client.
    Theme,
}

/// Identity of an installed plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Unique plugin name.
    pub name: String,
    /// Whether this is a regular plugin or a theme.
    #[serde(rename = "type", default)]
    pub plugin_type: PluginType,
    /// Plugin version, when known. Used only for attribution in logs.
    #[serde(default)]
    pub version: Option<String>,
}

/// A loadable client script owned by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptDescriptor {
    /// Path to the script module, relative to the configured plugin
    /// directory.
    pub script: PathBuf,
    /// Informational scope tags describing where the script applies
    /// (e.g. `common`, `video-watch`).
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ScriptDescriptor {
    /// The script path rendered for log attribution.
    pub fn display(&self) -> String {
        self.script.display().to_string()
    }
}

/// The descriptor pair handed to the loader and to the helpers factory.
#[derive(Debug, Clone)]
pub struct PluginInfo {
    /// The plugin's identity.
    pub plugin: Arc<PluginDescriptor>,
    /// The script being loaded for this plugin.
    pub script: Arc<ScriptDescriptor>,
}

impl PluginInfo {
    /// Creates a new descriptor pair.
    pub fn new(plugin: PluginDescriptor, script: ScriptDescriptor) -> Self {
        Self {
            plugin: Arc::new(plugin),
            script: Arc::new(script),
        }
    }

    /// Whether the described plugin is a theme.
    pub fn is_theme(&self) -> bool {
        self.plugin.plugin_type == PluginType::Theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_type_default_is_regular() {
        let descriptor: PluginDescriptor =
            serde_json::from_str(r#"{"name": "watch-tracker"}"#).unwrap();
        assert_eq!(descriptor.plugin_type, PluginType::Regular);
        assert!(descriptor.version.is_none());
    }

    #[test]
    fn test_theme_type_parses_from_kebab_case() {
        let descriptor: PluginDescriptor =
            serde_json::from_str(r#"{"name": "dark-mode", "type": "theme"}"#).unwrap();
        assert_eq!(descriptor.plugin_type, PluginType::Theme);

        let info = PluginInfo::new(
            descriptor,
            ScriptDescriptor {
                script: PathBuf::from("dark-mode/client.so"),
                scopes: vec!["common".to_string()],
            },
        );
        assert!(info.is_theme());
        assert_eq!(info.script.display(), "dark-mode/client.so");
    }
}
