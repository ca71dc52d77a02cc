//! StreamHub Client — host shell for the extension runtime.
//!
//! Wires configuration, logging, plugin discovery (a local manifest stands
//! in for the remote configuration transport), plugin loading, and the
//! initial hook runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, fmt};

use streamhub_core::config::ClientConfig;
use streamhub_core::error::AppError;
use streamhub_plugin::hooks::payloads::VideoListQuery;
use streamhub_plugin::{
    ClientHelpers, FormFieldRegistry, HookName, HookRegistry, HookRunner, LoadPluginOptions,
    PluginDescriptor, PluginInfo, PluginLoader, PluginType, ScriptDescriptor,
    SettingsScriptCallback,
};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<ClientConfig, AppError> {
    let env = std::env::var("STREAMHUB_ENV").unwrap_or_else(|_| "development".to_string());
    ClientConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &ClientConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// One plugin entry in the local manifest.
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    /// Plugin name.
    name: String,
    /// Regular plugin or theme.
    #[serde(rename = "type", default)]
    plugin_type: PluginType,
    /// Plugin version, for log attribution.
    #[serde(default)]
    version: Option<String>,
    /// Script path, relative to the plugin directory.
    script: PathBuf,
    /// Informational scope tags.
    #[serde(default)]
    scopes: Vec<String>,
}

/// The local plugin manifest — the discovery stand-in yielding descriptors.
#[derive(Debug, Default, Deserialize)]
struct PluginManifest {
    /// Plugins to load, in manifest order.
    #[serde(default)]
    plugins: Vec<ManifestEntry>,
}

/// Load the plugin manifest from the configured path
fn load_manifest(path: &str) -> Result<PluginManifest, AppError> {
    if !Path::new(path).exists() {
        tracing::info!(path, "No plugin manifest found, loading no plugins");
        return Ok(PluginManifest::default());
    }

    let manifest = config::Config::builder()
        .add_source(config::File::from(Path::new(path)))
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to read manifest '{path}': {e}")))?;

    manifest
        .try_deserialize()
        .map_err(|e| AppError::configuration(format!("Failed to parse manifest '{path}': {e}")))
}

/// Default helpers implementation handed to every plugin.
struct DefaultClientHelpers {
    /// Plugin this helpers object is bound to.
    plugin: String,
}

#[async_trait::async_trait]
impl ClientHelpers for DefaultClientHelpers {
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

    async fn plugin_settings(&self) -> Result<Value, AppError> {
        // Settings transport is not wired in the shell; plugins see an empty
        // settings object.
        Ok(json!({}))
    }
}

/// Main client run function
async fn run(config: ClientConfig) -> Result<(), AppError> {
    tracing::info!("Starting StreamHub client v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(HookRegistry::new());
    let form_fields = Arc::new(FormFieldRegistry::new());
    let loader = PluginLoader::new(&config.plugins.directory);

    let on_settings_script: SettingsScriptCallback = Arc::new(|_options| {
        tracing::debug!("Settings script registered");
    });

    if config.plugins.auto_load {
        let manifest = load_manifest(&config.plugins.manifest)?;
        tracing::info!(count = manifest.plugins.len(), "Loading plugins from manifest");

        let mut loaded = 0usize;
        let mut failed = 0usize;

        for entry in manifest.plugins {
            let plugin_info = PluginInfo::new(
                PluginDescriptor {
                    name: entry.name,
                    plugin_type: entry.plugin_type,
                    version: entry.version,
                },
                ScriptDescriptor {
                    script: entry.script,
                    scopes: entry.scopes,
                },
            );

            let outcome = loader.load_plugin(LoadPluginOptions {
                registry: Arc::clone(&registry),
                plugin_info,
                helpers_factory: Arc::new(|info| {
                    Arc::new(DefaultClientHelpers {
                        plugin: info.plugin.name.clone(),
                    })
                }),
                form_fields: Some(Arc::clone(&form_fields)),
                on_settings_script: Some(Arc::clone(&on_settings_script)),
            });

            if outcome.is_loaded() {
                loaded += 1;
            } else {
                failed += 1;
            }
        }

        tracing::info!(loaded, failed, "Plugin loading complete");
    } else {
        tracing::info!("Plugin auto-load disabled");
    }

    let runner = HookRunner::new(Arc::clone(&registry));

    runner
        .run(
            "action:application-init",
            Value::Null,
            json!({"client_version": env!("CARGO_PKG_VERSION")}),
        )
        .await;

    let query = runner
        .run_filter_typed(
            HookName::VideoListParams,
            VideoListQuery::default(),
            json!({"page": "home"}),
        )
        .await;

    tracing::info!(
        sort = %query.sort,
        count = query.count,
        hooks = registry.registered_hooks().len(),
        form_fields = form_fields.len(),
        "Client ready"
    );

    Ok(())
}
