//! Host helpers handed to each plugin.
//!
//! The helpers object is produced per plugin by a host-supplied factory so
//! every effect (settings lookups, translations, logging done by the host on
//! the plugin's behalf) is attributed to the right plugin. Plugins see only
//! this trait; it is their sole window into host services.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use streamhub_core::AppResult;

use crate::descriptor::PluginInfo;

/// Host utilities scoped to one plugin.
#[async_trait]
pub trait ClientHelpers: Send + Sync {
    /// Name of the plugin this helpers object is bound to.
    fn plugin_name(&self) -> &str;

    /// Base route for the plugin's static files.
    fn base_static_route(&self) -> String;

    /// Base route for the plugin's registered client routes.
    fn base_router_route(&self) -> String;

    /// Whether a user is currently logged in on this client.
    fn is_logged_in(&self) -> bool;

    /// Fetches the plugin's own settings from the host.
    async fn plugin_settings(&self) -> AppResult<Value>;

    /// Translates a source string into the client's locale.
    ///
    /// The default implementation returns the source unchanged.
    async fn translate(&self, source: &str) -> String {
        source.to_string()
    }
}

/// Factory producing a helpers object bound to one plugin's identity.
pub type HelpersFactory = Arc<dyn Fn(&PluginInfo) -> Arc<dyn ClientHelpers> + Send + Sync>;
