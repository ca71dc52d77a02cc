//! Plugin loader — opens a plugin's script module, hands its registration
//! entrypoint a capability-scoped registrar, and converts every failure into
//! a reported outcome.
//!
//! The loader never panics and never returns a bare error: a broken plugin
//! degrades into a logged, attributed [`PluginLoadOutcome`] and leaves other
//! plugins untouched. Entries a plugin managed to register before failing
//! stay in the registry (entries are never removed), and the script library
//! is kept alive so those handlers remain callable.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use libloading::Library;
use tracing::{error, info, warn};

use crate::api::form_fields::{CommonFormFieldOptions, FormFieldRegistry, VideoFormFieldOptions};
use crate::api::helpers::{ClientHelpers, HelpersFactory};
use crate::api::registrar::{PluginRegistrar, RegisterHookOptions};
use crate::api::settings::{SettingsScriptCallback, SettingsScriptOptions};
use crate::descriptor::PluginInfo;
use crate::error::PluginError;
use crate::hooks::catalog::HookName;
use crate::hooks::registry::{HookRegistry, RegistrationEntry};
use crate::report::panic_reason;

/// Version of the registration API. Loader and plugin must be built by the
/// same toolchain against the same version.
pub const CLIENT_API_VERSION: u32 = 1;

/// Export reporting the API version the plugin was built against.
pub const API_VERSION_SYMBOL: &[u8] = b"streamhub_client_api_version";

/// Export naming the plugin's registration entrypoint.
pub const REGISTER_SYMBOL: &[u8] = b"streamhub_register_client";

/// Type of the API version export.
pub type ApiVersionFn = unsafe extern "C" fn() -> u32;

/// Type of the registration entrypoint export.
pub type RegisterClientFn = fn(&mut dyn PluginRegistrar) -> anyhow::Result<()>;

/// Everything needed to load one plugin.
///
/// The optional fields define which capabilities the plugin gets: a plugin
/// loaded without `form_fields` cannot register video form fields, one
/// loaded without `on_settings_script` cannot register a settings script.
pub struct LoadPluginOptions {
    /// The shared hook registry.
    pub registry: Arc<HookRegistry>,
    /// Identity of the plugin and script being loaded.
    pub plugin_info: PluginInfo,
    /// Factory producing the helpers object for this plugin.
    pub helpers_factory: HelpersFactory,
    /// Form field registry, when the host supports custom video form fields.
    pub form_fields: Option<Arc<FormFieldRegistry>>,
    /// Settings script callback, when the host supports settings scripts.
    pub on_settings_script: Option<SettingsScriptCallback>,
}

/// Result of one plugin load, attributed to plugin and script.
#[derive(Debug)]
pub struct PluginLoadOutcome {
    /// Plugin name.
    pub plugin: String,
    /// Script path as given by the descriptor.
    pub script: String,
    /// `Ok` when the plugin registered successfully, otherwise the failure.
    pub result: Result<(), PluginError>,
}

impl PluginLoadOutcome {
    /// Whether the plugin loaded and registered successfully.
    pub fn is_loaded(&self) -> bool {
        self.result.is_ok()
    }
}

/// The capability object built per plugin; implements [`PluginRegistrar`].
pub struct ClientRegistrar {
    /// Identity of the plugin this registrar is bound to.
    info: PluginInfo,
    /// Shared hook registry.
    registry: Arc<HookRegistry>,
    /// Form field registry, when that capability was supplied.
    form_fields: Option<Arc<FormFieldRegistry>>,
    /// Settings script callback, when that capability was supplied.
    on_settings_script: Option<SettingsScriptCallback>,
    /// Helpers bound to this plugin.
    helpers: Arc<dyn ClientHelpers>,
}

impl ClientRegistrar {
    /// Builds the registrar for one load, invoking the helpers factory with
    /// the plugin's identity.
    pub fn new(options: &LoadPluginOptions) -> Self {
        let helpers = (options.helpers_factory)(&options.plugin_info);

        Self {
            info: options.plugin_info.clone(),
            registry: Arc::clone(&options.registry),
            form_fields: options.form_fields.clone(),
            on_settings_script: options.on_settings_script.clone(),
            helpers,
        }
    }
}

impl PluginRegistrar for ClientRegistrar {
    fn register_hook(&mut self, options: RegisterHookOptions) -> Result<(), PluginError> {
        let Some(hook) = HookName::from_name(&options.target) else {
            warn!(
                target = %options.target,
                plugin = %self.info.plugin.name,
                "Unknown hook target, skipping registration"
            );
            return Ok(());
        };

        self.registry.register(RegistrationEntry {
            plugin: Arc::clone(&self.info.plugin),
            script: Arc::clone(&self.info.script),
            hook,
            handler: options.handler,
            priority: options.priority.unwrap_or(0),
        });

        Ok(())
    }

    fn register_video_field(
        &mut self,
        common: CommonFormFieldOptions,
        video_form: VideoFormFieldOptions,
    ) -> Result<(), PluginError> {
        let Some(form_fields) = &self.form_fields else {
            return Err(PluginError::UnsupportedCapability {
                plugin: self.info.plugin.name.clone(),
                capability: "register_video_field",
            });
        };

        form_fields.register_video_field(common, video_form);
        Ok(())
    }

    fn register_settings_script(
        &mut self,
        options: SettingsScriptOptions,
    ) -> Result<(), PluginError> {
        let Some(callback) = &self.on_settings_script else {
            return Err(PluginError::UnsupportedCapability {
                plugin: self.info.plugin.name.clone(),
                capability: "register_settings_script",
            });
        };

        callback(options);
        Ok(())
    }

    fn helpers(&self) -> Arc<dyn ClientHelpers> {
        Arc::clone(&self.helpers)
    }
}

/// Loads plugin script modules and runs their registration entrypoints.
pub struct PluginLoader {
    /// Base directory script paths are resolved against.
    base_dir: PathBuf,
    /// Loaded libraries, kept alive for the loader's lifetime.
    libraries: Mutex<Vec<Library>>,
}

impl PluginLoader {
    /// Creates a loader resolving scripts against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            libraries: Mutex::new(Vec::new()),
        }
    }

    /// The directory script paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Number of script libraries this loader has opened.
    pub fn loaded_count(&self) -> usize {
        self.libraries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Loads one plugin: opens its script module, runs the registration
    /// entrypoint with a capability-scoped registrar, and re-sorts the hook
    /// registry on success.
    ///
    /// Never panics; every failure is folded into the returned outcome.
    pub fn load_plugin(&self, options: LoadPluginOptions) -> PluginLoadOutcome {
        let info = &options.plugin_info;
        info!(
            plugin = %info.plugin.name,
            script = %info.script.display(),
            "Loading plugin script"
        );

        let result = self
            .open_module(info)
            .and_then(|entry| run_entrypoint(&options, entry));

        report_outcome(&options.plugin_info, result)
    }

    /// Runs a compiled-in plugin's registration entrypoint through the same
    /// capability object and outcome reporting as a dynamic load.
    pub fn load_inline<F>(&self, options: LoadPluginOptions, entry: F) -> PluginLoadOutcome
    where
        F: FnOnce(&mut dyn PluginRegistrar) -> anyhow::Result<()>,
    {
        let result = run_entrypoint(&options, entry);
        report_outcome(&options.plugin_info, result)
    }

    /// Opens the script library, checks the API version, and resolves the
    /// registration entrypoint.
    fn open_module(&self, info: &PluginInfo) -> Result<RegisterClientFn, PluginError> {
        let path = self.base_dir.join(&info.script.script);

        // SAFETY: loading installed plugin code is the purpose of this
        // runtime; there is no isolation boundary beyond module scoping.
        let library = unsafe { Library::new(&path) }.map_err(|e| {
            module_load(info, format!("cannot open '{}': {e}", path.display()))
        })?;

        let version = {
            let api_version: libloading::Symbol<'_, ApiVersionFn> =
                unsafe { library.get(API_VERSION_SYMBOL) }.map_err(|e| {
                    module_load(info, format!("missing API version export: {e}"))
                })?;
            // SAFETY: the export has the declared zero-argument signature.
            unsafe { api_version() }
        };

        if version != CLIENT_API_VERSION {
            return Err(module_load(
                info,
                format!("API version mismatch: plugin has {version}, client expects {CLIENT_API_VERSION}"),
            ));
        }

        let entry = {
            let register: libloading::Symbol<'_, RegisterClientFn> =
                unsafe { library.get(REGISTER_SYMBOL) }.map_err(|e| {
                    module_load(info, format!("missing registration entrypoint: {e}"))
                })?;
            *register
        };

        // Handlers registered by the entrypoint reference code in this
        // library; it must stay alive even when registration fails midway.
        self.libraries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(library);

        Ok(entry)
    }
}

impl std::fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLoader")
            .field("base_dir", &self.base_dir)
            .field("loaded_count", &self.loaded_count())
            .finish()
    }
}

/// Builds the registrar and runs an entrypoint with panic isolation,
/// re-sorting the registry on success.
fn run_entrypoint<F>(options: &LoadPluginOptions, entry: F) -> Result<(), PluginError>
where
    F: FnOnce(&mut dyn PluginRegistrar) -> anyhow::Result<()>,
{
    let info = &options.plugin_info;
    let mut registrar = ClientRegistrar::new(options);

    match std::panic::catch_unwind(AssertUnwindSafe(|| entry(&mut registrar))) {
        Ok(Ok(())) => {
            options.registry.sort_all();
            Ok(())
        }
        Ok(Err(err)) => Err(match err.downcast::<PluginError>() {
            Ok(plugin_err) => plugin_err,
            Err(other) => PluginError::Registration {
                plugin: info.plugin.name.clone(),
                script: info.script.display(),
                reason: format!("{other:#}"),
            },
        }),
        Err(payload) => Err(PluginError::Registration {
            plugin: info.plugin.name.clone(),
            script: info.script.display(),
            reason: panic_reason(payload),
        }),
    }
}

fn module_load(info: &PluginInfo, reason: String) -> PluginError {
    PluginError::ModuleLoad {
        plugin: info.plugin.name.clone(),
        script: info.script.display(),
        reason,
    }
}

fn report_outcome(info: &PluginInfo, result: Result<(), PluginError>) -> PluginLoadOutcome {
    match &result {
        Ok(()) => info!(plugin = %info.plugin.name, "Plugin loaded"),
        Err(err) => error!(
            plugin = %info.plugin.name,
            script = %info.script.display(),
            error = %err,
            "Cannot load or register plugin"
        ),
    }

    PluginLoadOutcome {
        plugin: info.plugin.name.clone(),
        script: info.script.display(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::api::form_fields::{FormFieldType, VideoFormTarget};
    use crate::descriptor::{PluginDescriptor, ScriptDescriptor};
    use crate::hooks::registry::HookHandler;
    use streamhub_core::AppResult;

    struct NoopHandler;

    #[async_trait]
    impl HookHandler for NoopHandler {
        async fn handle(&self, value: Value, _params: Value) -> anyhow::Result<Value> {
            Ok(value)
        }
    }

    struct TestHelpers {
        plugin: String,
    }

    #[async_trait]
    impl ClientHelpers for TestHelpers {
        fn plugin_name(&self) -> &str {
            &self.plugin
        }

        fn base_static_route(&self) -> String {
            format!("/plugins/{}/static", self.plugin)
        }

        fn base_router_route(&self) -> String {
            format!("/plugins/{}/router", self.plugin)
        }

        fn is_logged_in(&self) -> bool {
            false
        }

        async fn plugin_settings(&self) -> AppResult<Value> {
            Ok(Value::Null)
        }
    }

    fn options(plugin: &str) -> LoadPluginOptions {
        options_with(plugin, Arc::new(HookRegistry::new()), None, None)
    }

    fn options_with(
        plugin: &str,
        registry: Arc<HookRegistry>,
        form_fields: Option<Arc<FormFieldRegistry>>,
        on_settings_script: Option<SettingsScriptCallback>,
    ) -> LoadPluginOptions {
        LoadPluginOptions {
            registry,
            plugin_info: PluginInfo::new(
                PluginDescriptor {
                    name: plugin.to_string(),
                    plugin_type: Default::default(),
                    version: None,
                },
                ScriptDescriptor {
                    script: format!("{plugin}/client.so").into(),
                    scopes: Vec::new(),
                },
            ),
            helpers_factory: Arc::new(|info| {
                Arc::new(TestHelpers {
                    plugin: info.plugin.name.clone(),
                })
            }),
            form_fields,
            on_settings_script,
        }
    }

    fn hook_options(target: &str, priority: Option<i32>) -> RegisterHookOptions {
        RegisterHookOptions {
            target: target.to_string(),
            handler: Arc::new(NoopHandler),
            priority,
        }
    }

    fn video_field() -> (CommonFormFieldOptions, VideoFormFieldOptions) {
        (
            CommonFormFieldOptions {
                name: "notes".to_string(),
                label: "Notes".to_string(),
                field_type: FormFieldType::InputTextarea,
                description_html: None,
                default_value: None,
            },
            VideoFormFieldOptions {
                target: VideoFormTarget::Upload,
                tab: None,
            },
        )
    }

    #[test]
    fn test_register_hook_with_unknown_target_is_a_logged_noop() {
        let opts = options("typo-plugin");
        let registry = Arc::clone(&opts.registry);
        let mut registrar = ClientRegistrar::new(&opts);

        let result = registrar.register_hook(hook_options("filter:definitely-not-real", None));

        assert!(result.is_ok());
        assert!(registry.registered_hooks().is_empty());
    }

    #[test]
    fn test_register_hook_defaults_priority_to_zero() {
        let opts = options("defaults");
        let registry = Arc::clone(&opts.registry);
        let mut registrar = ClientRegistrar::new(&opts);

        registrar
            .register_hook(hook_options("action:video-watch", None))
            .unwrap();

        let entries = registry.lookup(HookName::VideoWatch);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].priority, 0);
        assert_eq!(entries[0].plugin.name, "defaults");
    }

    #[test]
    fn test_register_video_field_without_capability_is_unsupported() {
        let opts = options("fields-plugin");
        let mut registrar = ClientRegistrar::new(&opts);

        let (common, video_form) = video_field();
        let err = registrar
            .register_video_field(common, video_form)
            .unwrap_err();

        match err {
            PluginError::UnsupportedCapability { plugin, capability } => {
                assert_eq!(plugin, "fields-plugin");
                assert_eq!(capability, "register_video_field");
            }
            other => panic!("expected UnsupportedCapability, got {other:?}"),
        }
    }

    #[test]
    fn test_register_video_field_with_capability_appends() {
        let form_fields = Arc::new(FormFieldRegistry::new());
        let opts = options_with(
            "fields-plugin",
            Arc::new(HookRegistry::new()),
            Some(Arc::clone(&form_fields)),
            None,
        );
        let mut registrar = ClientRegistrar::new(&opts);

        let (common, video_form) = video_field();
        registrar.register_video_field(common, video_form).unwrap();

        assert_eq!(form_fields.len(), 1);
        assert_eq!(form_fields.video_fields()[0].common.name, "notes");
    }

    #[test]
    fn test_register_settings_script_forwards_immediately() {
        let forwarded = Arc::new(AtomicUsize::new(0));
        let forwarded_in_callback = Arc::clone(&forwarded);
        let callback: SettingsScriptCallback = Arc::new(move |_options| {
            forwarded_in_callback.fetch_add(1, Ordering::SeqCst);
        });

        let opts = options_with(
            "settings-plugin",
            Arc::new(HookRegistry::new()),
            None,
            Some(callback),
        );
        let mut registrar = ClientRegistrar::new(&opts);

        registrar
            .register_settings_script(SettingsScriptOptions {
                is_setting_hidden: Arc::new(|_query| false),
            })
            .unwrap();

        assert_eq!(forwarded.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_register_settings_script_without_capability_is_unsupported() {
        let opts = options("settings-plugin");
        let mut registrar = ClientRegistrar::new(&opts);

        let err = registrar
            .register_settings_script(SettingsScriptOptions {
                is_setting_hidden: Arc::new(|_query| false),
            })
            .unwrap_err();

        assert!(matches!(err, PluginError::UnsupportedCapability { .. }));
    }

    #[test]
    fn test_helpers_are_bound_to_the_plugin_identity() {
        let opts = options("identified");
        let registrar = ClientRegistrar::new(&opts);

        let helpers = registrar.helpers();
        assert_eq!(helpers.plugin_name(), "identified");
        assert_eq!(helpers.base_static_route(), "/plugins/identified/static");
    }

    #[test]
    fn test_load_inline_sorts_the_registry_on_success() {
        let loader = PluginLoader::new("./plugins");
        let opts = options("sorter");
        let registry = Arc::clone(&opts.registry);

        let outcome = loader.load_inline(opts, |registrar| {
            registrar.register_hook(hook_options("action:video-watch", Some(5)))?;
            registrar.register_hook(hook_options("action:video-watch", Some(10)))?;
            Ok(())
        });

        assert!(outcome.is_loaded());
        let entries = registry.lookup(HookName::VideoWatch);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].priority, 10);
        assert_eq!(entries[1].priority, 5);
    }

    #[test]
    fn test_load_inline_keeps_partial_registrations_on_failure() {
        let loader = PluginLoader::new("./plugins");
        let opts = options("half-done");
        let registry = Arc::clone(&opts.registry);

        let outcome = loader.load_inline(opts, |registrar| {
            registrar.register_hook(hook_options("filter:menu-links", None))?;
            anyhow::bail!("remote settings unreachable")
        });

        assert!(!outcome.is_loaded());
        match &outcome.result {
            Err(PluginError::Registration { plugin, reason, .. }) => {
                assert_eq!(plugin, "half-done");
                assert!(reason.contains("remote settings unreachable"));
            }
            other => panic!("expected Registration failure, got {other:?}"),
        }
        assert_eq!(registry.handler_count(HookName::MenuLinks), 1);
    }

    #[test]
    fn test_load_inline_contains_entrypoint_panics() {
        let loader = PluginLoader::new("./plugins");
        let outcome = loader.load_inline(options("panicky"), |_registrar| {
            panic!("entrypoint exploded")
        });

        assert!(!outcome.is_loaded());
        match &outcome.result {
            Err(PluginError::Registration { reason, .. }) => {
                assert!(reason.contains("entrypoint exploded"));
            }
            other => panic!("expected Registration failure, got {other:?}"),
        }
    }

    #[test]
    fn test_load_inline_preserves_unsupported_capability_errors() {
        let loader = PluginLoader::new("./plugins");
        let outcome = loader.load_inline(options("needs-fields"), |registrar| {
            let (common, video_form) = video_field();
            registrar.register_video_field(common, video_form)?;
            Ok(())
        });

        assert!(matches!(
            outcome.result,
            Err(PluginError::UnsupportedCapability { capability: "register_video_field", .. })
        ));
    }

    #[test]
    fn test_load_plugin_with_missing_module_reports_module_load_failure() {
        let loader = PluginLoader::new("./definitely-missing-dir");
        let opts = options("ghost");
        let registry = Arc::clone(&opts.registry);

        let outcome = loader.load_plugin(opts);

        assert!(!outcome.is_loaded());
        assert_eq!(outcome.plugin, "ghost");
        assert_eq!(outcome.script, "ghost/client.so");
        assert!(matches!(outcome.result, Err(PluginError::ModuleLoad { .. })));
        assert!(registry.registered_hooks().is_empty());
        assert_eq!(loader.loaded_count(), 0);
    }
}
