//! Watch tracker plugin — records watch activity and trims oversized video
//! listing queries.
//!
//! Built as a `cdylib` and loaded by the StreamHub client through its plugin
//! manifest.

use std::sync::Arc;

use streamhub_plugin_sdk::prelude::*;

pub mod hooks;

use hooks::{VideoListLimiter, WatchCounter};

/// Largest video listing page this plugin allows.
const MAX_PAGE_SIZE: u64 = 50;

/// Registration entrypoint.
pub fn register(registrar: &mut dyn PluginRegistrar) -> anyhow::Result<()> {
    let helpers = registrar.helpers();
    tracing::debug!(plugin = helpers.plugin_name(), "Registering watch tracker");

    registrar.register_hook(RegisterHookOptions {
        target: "action:video-watch".to_string(),
        handler: Arc::new(WatchCounter::new()),
        priority: None,
    })?;

    registrar.register_hook(RegisterHookOptions {
        target: "filter:video-list-params".to_string(),
        handler: Arc::new(VideoListLimiter::new(MAX_PAGE_SIZE)),
        priority: Some(10),
    })?;

    registrar.register_video_field(
        CommonFormFieldOptions {
            name: "watch-tracker-notes".to_string(),
            label: "Viewing notes".to_string(),
            field_type: FormFieldType::InputTextarea,
            description_html: Some(
                "Private notes shown next to this video in your watch history.".to_string(),
            ),
            default_value: None,
        },
        VideoFormFieldOptions {
            target: VideoFormTarget::Upload,
            tab: None,
        },
    )?;

    Ok(())
}

streamhub_plugin_sdk::export_client_script!(register);
