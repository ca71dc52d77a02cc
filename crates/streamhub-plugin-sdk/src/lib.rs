//! # streamhub-plugin-sdk
//!
//! SDK for developing client plugins for StreamHub.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use streamhub_plugin_sdk::prelude::*;
//!
//! fn register(registrar: &mut dyn PluginRegistrar) -> anyhow::Result<()> {
//!     registrar.register_hook(RegisterHookOptions {
//!         target: "action:video-watch".to_string(),
//!         handler: ClosureHandler::wrap(|_value, params| async move {
//!             println!("video watched: {}", params["video_id"]);
//!             Ok(Value::Null)
//!         }),
//!         priority: None,
//!     })?;
//!     Ok(())
//! }
//!
//! streamhub_plugin_sdk::export_client_script!(register);
//! ```

pub mod macros;
pub mod traits;

// Re-exported for the generated entry symbols.
pub use anyhow;
pub use streamhub_plugin::loader::CLIENT_API_VERSION;

/// Prelude for convenient imports.
pub mod prelude {
    pub use anyhow;
    pub use async_trait::async_trait;
    pub use serde_json::Value;

    pub use streamhub_plugin::api::form_fields::{
        CommonFormFieldOptions, FormFieldType, VideoFormFieldOptions, VideoFormTab,
        VideoFormTarget,
    };
    pub use streamhub_plugin::api::helpers::ClientHelpers;
    pub use streamhub_plugin::api::registrar::{PluginRegistrar, RegisterHookOptions};
    pub use streamhub_plugin::api::settings::{SettingVisibilityQuery, SettingsScriptOptions};
    pub use streamhub_plugin::hooks::registry::HookHandler;

    pub use crate::traits::ClosureHandler;
}
