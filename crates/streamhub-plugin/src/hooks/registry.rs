//! Hook registry — plugins register handlers by hook name with priority
//! ordering.
//!
//! The registry is append-only: entries are created during a plugin's
//! registration entrypoint, never mutated, and never removed. Ordering is
//! normalized by [`HookRegistry::sort_all`] after each load; reads between a
//! load and the following sort see whatever order currently holds.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::catalog::HookName;
use crate::descriptor::{PluginDescriptor, ScriptDescriptor};

/// Trait for hook handler implementations.
///
/// For filter hooks, `value` is the value threaded through the chain and the
/// returned value feeds the next handler. For action hooks, `value` is
/// `Value::Null` and the return value is ignored.
#[async_trait]
pub trait HookHandler: Send + Sync {
    /// Handles one hook invocation.
    async fn handle(&self, value: Value, params: Value) -> anyhow::Result<Value>;
}

/// One registered handler, bound to the plugin and script that created it.
#[derive(Clone)]
pub struct RegistrationEntry {
    /// Plugin that registered this handler.
    pub plugin: Arc<PluginDescriptor>,
    /// Script the handler came from.
    pub script: Arc<ScriptDescriptor>,
    /// Hook the handler responds to.
    pub hook: HookName,
    /// The handler itself.
    pub handler: Arc<dyn HookHandler>,
    /// Priority; higher runs earlier.
    pub priority: i32,
}

impl std::fmt::Debug for RegistrationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEntry")
            .field("plugin", &self.plugin.name)
            .field("script", &self.script.script)
            .field("hook", &self.hook)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Registry of hook handlers organized by hook name.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook name → registration entries, in registration order until sorted.
    entries: RwLock<HashMap<HookName, Vec<RegistrationEntry>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Appends an entry to the list for its hook name.
    ///
    /// The append is atomic with respect to other appends and to
    /// [`sort_all`](Self::sort_all). Ordering is not re-established here;
    /// call `sort_all` after a load batch.
    pub fn register(&self, entry: RegistrationEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        debug!(
            hook = %entry.hook,
            plugin = %entry.plugin.name,
            priority = entry.priority,
            "Hook handler registered"
        );

        entries.entry(entry.hook).or_default().push(entry);
    }

    /// Re-sorts every hook's entry list by descending priority.
    ///
    /// The sort is stable: entries with equal priority keep their relative
    /// registration order. Idempotent — sorting twice with no intervening
    /// registration yields the same order.
    pub fn sort_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        for list in entries.values_mut() {
            list.sort_by_key(|entry| std::cmp::Reverse(entry.priority));
        }
    }

    /// Returns a snapshot of the entries for a hook, in current order.
    pub fn lookup(&self, hook: HookName) -> Vec<RegistrationEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&hook).cloned().unwrap_or_default()
    }

    /// Returns whether any handlers are registered for a hook.
    pub fn has_handlers(&self, hook: HookName) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&hook).is_some_and(|list| !list.is_empty())
    }

    /// Returns the number of handlers registered for a hook.
    pub fn handler_count(&self, hook: HookName) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&hook).map(|list| list.len()).unwrap_or(0)
    }

    /// Returns all hook names with at least one registered handler.
    pub fn registered_hooks(&self) -> Vec<HookName> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(hook, _)| *hook)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopHandler;

    #[async_trait]
    impl HookHandler for NoopHandler {
        async fn handle(&self, value: Value, _params: Value) -> anyhow::Result<Value> {
            Ok(value)
        }
    }

    fn entry(plugin: &str, hook: HookName, priority: i32) -> RegistrationEntry {
        RegistrationEntry {
            plugin: Arc::new(PluginDescriptor {
                name: plugin.to_string(),
                plugin_type: Default::default(),
                version: None,
            }),
            script: Arc::new(ScriptDescriptor {
                script: format!("{plugin}/client.so").into(),
                scopes: Vec::new(),
            }),
            hook,
            handler: Arc::new(NoopHandler),
            priority,
        }
    }

    fn plugin_names(registry: &HookRegistry, hook: HookName) -> Vec<String> {
        registry
            .lookup(hook)
            .iter()
            .map(|e| e.plugin.name.clone())
            .collect()
    }

    #[test]
    fn test_sort_orders_by_descending_priority() {
        let registry = HookRegistry::new();
        registry.register(entry("low", HookName::VideoWatch, 5));
        registry.register(entry("high", HookName::VideoWatch, 10));
        registry.register(entry("mid", HookName::VideoWatch, 7));
        registry.sort_all();

        assert_eq!(
            plugin_names(&registry, HookName::VideoWatch),
            ["high", "mid", "low"]
        );
    }

    #[test]
    fn test_equal_priority_preserves_registration_order() {
        let registry = HookRegistry::new();
        registry.register(entry("first", HookName::VideoListParams, 0));
        registry.register(entry("second", HookName::VideoListParams, 0));
        registry.register(entry("boosted", HookName::VideoListParams, 1));
        registry.register(entry("third", HookName::VideoListParams, 0));
        registry.sort_all();

        assert_eq!(
            plugin_names(&registry, HookName::VideoListParams),
            ["boosted", "first", "second", "third"]
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let registry = HookRegistry::new();
        registry.register(entry("a", HookName::MenuLinks, 0));
        registry.register(entry("b", HookName::MenuLinks, 0));
        registry.register(entry("c", HookName::MenuLinks, 3));

        registry.sort_all();
        let once = plugin_names(&registry, HookName::MenuLinks);
        registry.sort_all();
        let twice = plugin_names(&registry, HookName::MenuLinks);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_lookup_unregistered_hook_is_empty() {
        let registry = HookRegistry::new();
        assert!(registry.lookup(HookName::SearchParams).is_empty());
        assert!(!registry.has_handlers(HookName::SearchParams));
        assert_eq!(registry.handler_count(HookName::SearchParams), 0);
    }

    #[test]
    fn test_registered_hooks_lists_populated_names() {
        let registry = HookRegistry::new();
        registry.register(entry("a", HookName::VideoWatch, 0));
        registry.register(entry("a", HookName::MenuLinks, 0));

        let mut hooks = registry.registered_hooks();
        hooks.sort_by_key(|h| h.as_str());
        assert_eq!(hooks, [HookName::VideoWatch, HookName::MenuLinks]);
    }
}
