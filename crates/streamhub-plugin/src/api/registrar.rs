//! The capability object handed to a plugin's registration entrypoint.
//!
//! This trait is the plugin's entire view of the host during registration:
//! exactly `register_hook`, `register_video_field`,
//! `register_settings_script`, and `helpers` — nothing else. The concrete
//! implementation is built by the loader, bound to one plugin's identity and
//! to the capabilities the host chose to supply for that load.

use std::sync::Arc;

use super::form_fields::{CommonFormFieldOptions, VideoFormFieldOptions};
use super::helpers::ClientHelpers;
use super::settings::SettingsScriptOptions;
use crate::error::PluginError;
use crate::hooks::registry::HookHandler;

/// Options for one `register_hook` call.
pub struct RegisterHookOptions {
    /// Hook name to register against. Names outside the catalog are logged
    /// and skipped.
    pub target: String,
    /// The handler to run when the hook fires.
    pub handler: Arc<dyn HookHandler>,
    /// Execution priority; higher runs earlier. Defaults to 0.
    pub priority: Option<i32>,
}

impl std::fmt::Debug for RegisterHookOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterHookOptions")
            .field("target", &self.target)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Registration capabilities exposed to one plugin.
pub trait PluginRegistrar: Send {
    /// Registers a hook handler.
    ///
    /// An unknown target is logged and skipped without error, so one typo
    /// does not abort the plugin's remaining registrations.
    fn register_hook(&mut self, options: RegisterHookOptions) -> Result<(), PluginError>;

    /// Adds a custom field to the video forms.
    ///
    /// Returns [`PluginError::UnsupportedCapability`] when the host did not
    /// supply a form field registry for this load.
    fn register_video_field(
        &mut self,
        common: CommonFormFieldOptions,
        video_form: VideoFormFieldOptions,
    ) -> Result<(), PluginError>;

    /// Registers a settings script.
    ///
    /// Returns [`PluginError::UnsupportedCapability`] when the host did not
    /// supply a settings callback for this load. The options are forwarded
    /// immediately and not stored.
    fn register_settings_script(
        &mut self,
        options: SettingsScriptOptions,
    ) -> Result<(), PluginError>;

    /// The host helpers bound to this plugin.
    fn helpers(&self) -> Arc<dyn ClientHelpers>;
}
