//! Hook runner — executes a hook's handler chain with action/filter
//! semantics and per-handler fault isolation.
//!
//! Handlers run strictly one at a time, in registry order; filter hooks
//! thread the value from handler to handler, which is only deterministic
//! under sequential execution. A handler that returns an error or panics is
//! reported and skipped: the chain continues with the value it had before
//! that handler ran, and the caller of [`HookRunner::run`] never observes a
//! failure.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use super::catalog::{HookKind, HookName};
use super::registry::{HookRegistry, RegistrationEntry};
use crate::error::PluginError;
use crate::report::{HookFailureReporter, TracingReporter, panic_reason};

/// Executes hook chains against a shared registry.
pub struct HookRunner {
    /// Hook registry.
    registry: Arc<HookRegistry>,
    /// Destination for contained handler failures.
    reporter: Arc<dyn HookFailureReporter>,
}

impl HookRunner {
    /// Creates a runner that reports handler failures through `tracing`.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self::with_reporter(registry, Arc::new(TracingReporter))
    }

    /// Creates a runner with a custom failure reporter.
    pub fn with_reporter(registry: Arc<HookRegistry>, reporter: Arc<dyn HookFailureReporter>) -> Self {
        Self { registry, reporter }
    }

    /// Runs the handler chain registered for `name`.
    ///
    /// Unknown hook names and hooks with no registered handlers return
    /// `initial` unchanged. For action hooks the return value always equals
    /// `initial`; for filter hooks it is the cumulative transformation.
    pub async fn run(&self, name: &str, initial: Value, params: Value) -> Value {
        let Some(hook) = HookName::from_name(name) else {
            return initial;
        };

        let entries = self.registry.lookup(hook);
        let mut current = initial;

        for entry in &entries {
            debug!(hook = name, plugin = %entry.plugin.name, "Running hook");

            let input = match hook.kind() {
                HookKind::Action => Value::Null,
                HookKind::Filter => current.clone(),
            };

            match invoke_handler(entry, input, params.clone()).await {
                Ok(output) => {
                    if hook.kind() == HookKind::Filter {
                        current = output;
                    }
                }
                Err(err) => self.reporter.report(&err),
            }
        }

        current
    }

    /// Runs a filter hook with a typed value, round-tripping through
    /// [`Value`].
    ///
    /// If the chain produces a value that no longer matches `T`, the failure
    /// is logged and the input is returned unchanged.
    pub async fn run_filter_typed<T>(&self, hook: HookName, value: T, params: Value) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let initial = match serde_json::to_value(&value) {
            Ok(initial) => initial,
            Err(err) => {
                error!(hook = %hook, error = %err, "Cannot serialize filter hook value");
                return value;
            }
        };

        let result = self.run(hook.as_str(), initial, params).await;

        match serde_json::from_value(result) {
            Ok(transformed) => transformed,
            Err(err) => {
                error!(
                    hook = %hook,
                    error = %err,
                    "Filter chain produced a value of an unexpected shape"
                );
                value
            }
        }
    }

    /// Returns the registry this runner reads from.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

/// Invokes one handler, converting errors and panics into an attributed
/// [`PluginError::HandlerExecution`].
async fn invoke_handler(
    entry: &RegistrationEntry,
    value: Value,
    params: Value,
) -> Result<Value, PluginError> {
    let invocation = AssertUnwindSafe(entry.handler.handle(value, params));

    let reason = match invocation.catch_unwind().await {
        Ok(Ok(output)) => return Ok(output),
        Ok(Err(err)) => err.to_string(),
        Err(payload) => panic_reason(payload),
    };

    Err(PluginError::HandlerExecution {
        plugin: entry.plugin.name.clone(),
        script: entry.script.display(),
        hook: entry.hook.as_str().to_string(),
        reason,
    })
}
