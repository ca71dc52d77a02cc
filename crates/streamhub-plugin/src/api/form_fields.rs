//! Form field registry — plugins add custom fields to the video forms.
//!
//! The registry is an append-only ordered list; fields render in
//! registration order. It is an optional capability: the loader only exposes
//! it to a plugin when the host supplied a registry for that load.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Widget used to render a custom form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormFieldType {
    /// Single-line text input.
    Input,
    /// Checkbox.
    InputCheckbox,
    /// Password input.
    InputPassword,
    /// Multi-line text area.
    InputTextarea,
    /// Markdown editor limited to basic formatting.
    MarkdownText,
    /// Markdown editor with full formatting.
    MarkdownEnhanced,
    /// Select dropdown.
    Select,
    /// Raw HTML block.
    Html,
}

/// Options shared by every custom form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonFormFieldOptions {
    /// Field name used as the submission key.
    pub name: String,
    /// Label shown next to the widget.
    pub label: String,
    /// Widget type.
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    /// Optional HTML description rendered under the label.
    #[serde(default)]
    pub description_html: Option<String>,
    /// Default value for the field.
    #[serde(default)]
    pub default_value: Option<Value>,
}

/// Which video form a custom field appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoFormTarget {
    /// The video update form.
    Update,
    /// The upload form.
    Upload,
    /// The URL import form.
    ImportUrl,
    /// The torrent import form.
    ImportTorrent,
    /// The go-live form.
    GoLive,
}

/// Tab of the video form a custom field appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoFormTab {
    /// The main metadata tab.
    Main,
    /// The plugin settings tab.
    PluginSettings,
}

/// Placement options for a custom field on the video forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFormFieldOptions {
    /// Which form the field appears on.
    #[serde(rename = "type")]
    pub target: VideoFormTarget,
    /// Which tab of that form; defaults to the main tab when absent.
    #[serde(default)]
    pub tab: Option<VideoFormTab>,
}

/// One registered video form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFormField {
    /// Common rendering options.
    pub common: CommonFormFieldOptions,
    /// Video form placement options.
    pub video_form: VideoFormFieldOptions,
}

/// Append-only store of custom video form fields.
#[derive(Debug, Default)]
pub struct FormFieldRegistry {
    /// Registered fields, in registration order.
    video: RwLock<Vec<VideoFormField>>,
}

impl FormFieldRegistry {
    /// Creates a new empty form field registry.
    pub fn new() -> Self {
        Self {
            video: RwLock::new(Vec::new()),
        }
    }

    /// Appends a video form field.
    pub fn register_video_field(
        &self,
        common: CommonFormFieldOptions,
        video_form: VideoFormFieldOptions,
    ) {
        let mut fields = self.video.write().unwrap_or_else(PoisonError::into_inner);
        fields.push(VideoFormField { common, video_form });
    }

    /// Returns a snapshot of all registered fields, in registration order.
    pub fn video_fields(&self) -> Vec<VideoFormField> {
        let fields = self.video.read().unwrap_or_else(PoisonError::into_inner);
        fields.clone()
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        let fields = self.video.read().unwrap_or_else(PoisonError::into_inner);
        fields.len()
    }

    /// Returns whether no fields have been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> (CommonFormFieldOptions, VideoFormFieldOptions) {
        (
            CommonFormFieldOptions {
                name: name.to_string(),
                label: name.to_string(),
                field_type: FormFieldType::Input,
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
    fn test_fields_preserve_registration_order() {
        let registry = FormFieldRegistry::new();
        for name in ["first", "second", "third"] {
            let (common, video_form) = field(name);
            registry.register_video_field(common, video_form);
        }

        let names: Vec<String> = registry
            .video_fields()
            .into_iter()
            .map(|f| f.common.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_field_type_serializes_kebab_case() {
        let (mut common, _) = field("notes");
        common.field_type = FormFieldType::MarkdownEnhanced;
        let value = serde_json::to_value(&common).unwrap();
        assert_eq!(value["type"], "markdown-enhanced");
    }
}
