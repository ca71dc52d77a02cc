//! Plugin runtime error taxonomy.
//!
//! Every failure is attributed to the plugin (and script) that caused it so
//! the host can log it without guessing. None of these errors propagate out
//! of the runtime's public entry points: loads report an outcome value and
//! hook execution failures go to the configured reporter.

use thiserror::Error;

/// Errors produced while loading plugins or executing their hook handlers.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin's script module could not be loaded: missing file, loader
    /// error, missing entry exports, or an API version mismatch.
    #[error("cannot load script '{script}' of plugin '{plugin}': {reason}")]
    ModuleLoad {
        /// Plugin the script belongs to.
        plugin: String,
        /// Script path as given by the descriptor.
        script: String,
        /// What went wrong.
        reason: String,
    },

    /// The plugin invoked a registration capability that was not supplied to
    /// the loader for this plugin.
    #[error("plugin '{plugin}' called '{capability}' which is not supported in this context")]
    UnsupportedCapability {
        /// Plugin that made the call.
        plugin: String,
        /// Name of the capability method.
        capability: &'static str,
    },

    /// The registration entrypoint returned an error or panicked.
    #[error("cannot register plugin '{plugin}' (script '{script}'): {reason}")]
    Registration {
        /// Plugin whose entrypoint failed.
        plugin: String,
        /// Script path as given by the descriptor.
        script: String,
        /// What went wrong.
        reason: String,
    },

    /// A hook handler returned an error or panicked during execution.
    #[error("cannot run hook '{hook}' of script '{script}' of plugin '{plugin}': {reason}")]
    HandlerExecution {
        /// Plugin that registered the handler.
        plugin: String,
        /// Script the handler came from.
        script: String,
        /// Hook being executed.
        hook: String,
        /// What went wrong.
        reason: String,
    },
}
