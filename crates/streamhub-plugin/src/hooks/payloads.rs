//! Typed payloads for the most heavily used filter hooks.
//!
//! Hook values travel the chain as [`serde_json::Value`]; these structs give
//! host call sites a checked shape at the boundary, via
//! [`HookRunner::run_filter_typed`](super::runner::HookRunner::run_filter_typed).
//! Unknown keys added by plugins survive the round trip through the
//! `extra` maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// NSFW handling requested for a video listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NsfwPolicy {
    /// Exclude NSFW videos entirely.
    #[default]
    DoNotList,
    /// Include NSFW videos with blurred thumbnails.
    Blur,
    /// Include NSFW videos unmodified.
    Display,
}

/// Query used to fetch a video listing; threaded through
/// `filter:video-list-params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoListQuery {
    /// Sort criterion, `-` prefix for descending.
    pub sort: String,
    /// Page size.
    pub count: u32,
    /// NSFW policy applied to the listing.
    pub nsfw_policy: NsfwPolicy,
    /// Restrict the listing to live (or non-live) videos.
    pub is_live: Option<bool>,
    /// Plugin-added keys, preserved through the chain.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for VideoListQuery {
    fn default() -> Self {
        Self {
            sort: "-publishedAt".to_string(),
            count: 25,
            nsfw_policy: NsfwPolicy::default(),
            is_live: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Options used to build the video player; threaded through
/// `filter:player-options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerOptions {
    /// Start playback as soon as the player is ready.
    pub autoplay: bool,
    /// Allow peer-to-peer segment exchange.
    pub p2p_enabled: bool,
    /// Playback rates offered in the player menu.
    pub playback_rates: Vec<f64>,
    /// Plugin-added keys, preserved through the chain.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            p2p_enabled: true,
            playback_rates: vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0],
            extra: BTreeMap::new(),
        }
    }
}
