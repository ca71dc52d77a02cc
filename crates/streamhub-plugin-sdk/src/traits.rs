//! Closure-based hook handlers for quick plugin development.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use streamhub_plugin::hooks::registry::HookHandler;

/// A hook handler backed by an async closure.
///
/// Saves plugins from declaring a struct per handler when the handler has no
/// state of its own.
pub struct ClosureHandler {
    /// Handler function.
    handler: Arc<
        dyn Fn(Value, Value) -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync,
    >,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |value, params| Box::pin(handler(value, params))),
        }
    }

    /// Wraps an async closure into an `Arc<dyn HookHandler>` ready for
    /// registration.
    pub fn wrap<F, Fut>(handler: F) -> Arc<dyn HookHandler>
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Arc::new(Self::new(handler))
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, value: Value, params: Value) -> anyhow::Result<Value> {
        (self.handler)(value, params).await
    }
}
