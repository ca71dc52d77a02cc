//! Hook failure reporting.
//!
//! Handler failures are contained inside the runner; they are handed to a
//! [`HookFailureReporter`] instead of propagating to the host's calling code.
//! The default reporter logs through `tracing`; tests inject their own to
//! observe failures without global logging state.

use std::any::Any;

use crate::error::PluginError;

/// Receives contained hook execution failures.
pub trait HookFailureReporter: Send + Sync {
    /// Reports one failure. Must not panic.
    fn report(&self, error: &PluginError);
}

/// Default reporter that logs failures through `tracing`.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl HookFailureReporter for TracingReporter {
    fn report(&self, error: &PluginError) {
        tracing::error!(error = %error, "Hook execution failure");
    }
}

/// Extracts a readable message from a caught panic payload.
pub(crate) fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
