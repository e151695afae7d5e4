//! Tool registry: resolves tool ids to implementations.
//!
//! Built once from an ordered sequence of tools and never mutated after.
//! Ids are indexed lowercased so lookups are case-insensitive. When two tools
//! share an id the first registration is kept and later ones are dropped with
//! a warning. The registry never executes tools.

use std::collections::HashMap;
use std::sync::Arc;

use devforge_config::{FilterDecision, ToolFilter};
use tracing::{debug, warn};

use crate::tool::Tool;

/// Immutable collection of available tools, keyed by lowercased id.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Build a registry from tools in registration order.
    ///
    /// Tools rejected by `filter` are skipped. Never fails.
    pub fn build<I>(tools: I, filter: Option<&ToolFilter>) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut map: HashMap<String, Arc<dyn Tool>> = HashMap::new();
        if let Some(filter) = filter {
            debug!(
                allow_list = filter.has_allow_list(),
                denied = filter.denied_count(),
                "Applying tool filter"
            );
        }

        for tool in tools {
            let id = tool.id().to_string();

            if let Some(filter) = filter {
                let decision = filter.evaluate(&id);
                if decision != FilterDecision::Enabled {
                    debug!(id = %id, ?decision, "Tool filtered out");
                    continue;
                }
            }

            let key = id.to_lowercase();
            if let Some(existing) = map.get(&key) {
                warn!(
                    id = %id,
                    kept = %existing.id(),
                    "Duplicate tool id; keeping first registration"
                );
                continue;
            }
            map.insert(key, tool);
        }

        debug!(count = map.len(), "Tool registry built");
        Self { tools: map }
    }

    /// A registry holding the built-in catalog.
    pub fn with_builtin_tools(filter: Option<&ToolFilter>) -> Self {
        Self::build(crate::tools::builtin_tools(), filter)
    }

    /// All registered tools, in no particular order.
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    /// All registered tools sorted by category, then id.
    pub fn sorted(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools = self.list();
        tools.sort_by(|a, b| {
            let (a, b) = (a.descriptor(), b.descriptor());
            a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id))
        });
        tools
    }

    /// Look up a tool by id, ignoring case.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(&id.to_lowercase()).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(&id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.tools.values().map(|t| t.id()).collect();
        ids.sort_unstable();
        f.debug_struct("ToolRegistry").field("tools", &ids).finish()
    }
}
