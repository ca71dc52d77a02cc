//! # streamhub-plugin
//!
//! Client extension runtime for StreamHub. Provides:
//!
//! - A closed hook catalog (action and filter hooks)
//! - A priority-ordered hook registry with stable sorting
//! - A plugin loader handing each script a capability-scoped registration API
//! - A hook runner with value threading and per-handler fault isolation
//! - Optional form field and settings script capabilities
//!
//! One broken plugin never breaks the host or other plugins: load failures
//! become reported outcomes and handler failures are contained inside the
//! runner.

pub mod api;
pub mod descriptor;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod report;

pub use api::form_fields::{
    CommonFormFieldOptions, FormFieldRegistry, FormFieldType, VideoFormField, VideoFormFieldOptions,
    VideoFormTab, VideoFormTarget,
};
pub use api::helpers::{ClientHelpers, HelpersFactory};
pub use api::registrar::{PluginRegistrar, RegisterHookOptions};
pub use api::settings::{SettingVisibilityQuery, SettingsScriptCallback, SettingsScriptOptions};
pub use descriptor::{PluginDescriptor, PluginInfo, PluginType, ScriptDescriptor};
pub use error::PluginError;
pub use hooks::catalog::{HookKind, HookName};
pub use hooks::registry::{HookHandler, HookRegistry, RegistrationEntry};
pub use hooks::runner::HookRunner;
pub use loader::{
    CLIENT_API_VERSION, ClientRegistrar, LoadPluginOptions, PluginLoadOutcome, PluginLoader,
};
pub use report::{HookFailureReporter, TracingReporter};
