//! Settings script registration — plugins customize the settings form.
//!
//! Unlike hooks and form fields, nothing is stored by the runtime: the
//! options are forwarded immediately to a host callback, which decides what
//! to do with them. This too is an optional capability.

use std::sync::Arc;

use serde_json::Value;

/// Query passed to a plugin's setting visibility predicate.
#[derive(Debug, Clone)]
pub struct SettingVisibilityQuery {
    /// Name of the setting being rendered.
    pub setting_name: String,
    /// Current values of the whole settings form.
    pub form_values: Value,
}

/// Options a plugin supplies to customize its settings form.
#[derive(Clone)]
pub struct SettingsScriptOptions {
    /// Predicate deciding whether a setting is hidden given the current form
    /// values.
    pub is_setting_hidden: Arc<dyn Fn(&SettingVisibilityQuery) -> bool + Send + Sync>,
}

impl std::fmt::Debug for SettingsScriptOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsScriptOptions")
            .field("is_setting_hidden", &"<predicate>")
            .finish()
    }
}

/// Host callback receiving a plugin's settings script options.
pub type SettingsScriptCallback = Arc<dyn Fn(SettingsScriptOptions) + Send + Sync>;
