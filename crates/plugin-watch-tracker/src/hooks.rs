//! Hook handlers for the watch tracker plugin.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Value, json};

use streamhub_plugin_sdk::prelude::*;

/// Counts watched videos over the client session.
#[derive(Debug, Default)]
pub struct WatchCounter {
    /// Number of videos watched since the plugin loaded.
    watched: AtomicU64,
}

impl WatchCounter {
    /// Creates a new counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of watches recorded so far.
    pub fn watched(&self) -> u64 {
        self.watched.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HookHandler for WatchCounter {
    async fn handle(&self, _value: Value, params: Value) -> anyhow::Result<Value> {
        let watched = self.watched.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            video_id = %params["video_id"],
            watched,
            "Video watch recorded"
        );
        Ok(Value::Null)
    }
}

/// Caps the page size of video listing queries.
#[derive(Debug)]
pub struct VideoListLimiter {
    /// Largest page size the plugin allows.
    max_count: u64,
}

impl VideoListLimiter {
    /// Creates a limiter with the given maximum page size.
    pub fn new(max_count: u64) -> Self {
        Self { max_count }
    }
}

#[async_trait]
impl HookHandler for VideoListLimiter {
    async fn handle(&self, value: Value, _params: Value) -> anyhow::Result<Value> {
        let mut query = value;

        if let Some(count) = query["count"].as_u64()
            && count > self.max_count
        {
            tracing::debug!(count, max_count = self.max_count, "Capping video page size");
            query["count"] = json!(self.max_count);
        }

        Ok(query)
    }
}
