//! Allow/deny gating by tool id.
//!
//! A [`ToolFilter`] decides, once per tool at registry-build time, whether a
//! tool is exposed. The deny-set is always consulted and wins over the
//! allow-set; an absent allow-set places no restriction.
//!
//! Ids are compared case-insensitively: both sets store lowercased ids and
//! every query is lowercased before lookup.

use std::collections::HashSet;

/// The outcome of evaluating a tool id against a [`ToolFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// The id passed both checks.
    Enabled,
    /// The id is in the deny-set.
    Denied,
    /// An allow-set exists and the id is not in it.
    NotAllowed,
}

/// Allow/deny filter over tool ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    allow: Option<HashSet<String>>,
    deny: HashSet<String>,
}

impl ToolFilter {
    /// A filter that enables every id.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Build a filter from an optional allow-list and a deny-list.
    pub fn new<A, D, S, T>(allow: Option<A>, deny: D) -> Self
    where
        A: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            allow: allow.map(|ids| ids.into_iter().map(|id| normalize(id.as_ref())).collect()),
            deny: deny.into_iter().map(|id| normalize(id.as_ref())).collect(),
        }
    }

    /// Add an id to the allow-set, creating the set if it does not exist yet.
    pub fn allow(mut self, id: &str) -> Self {
        self.allow
            .get_or_insert_with(HashSet::new)
            .insert(normalize(id));
        self
    }

    /// Add an id to the deny-set.
    pub fn deny(mut self, id: &str) -> Self {
        self.deny.insert(normalize(id));
        self
    }

    /// Evaluate an id, reporting why it was rejected.
    pub fn evaluate(&self, id: &str) -> FilterDecision {
        let id = normalize(id);
        if self.deny.contains(&id) {
            return FilterDecision::Denied;
        }
        match &self.allow {
            Some(allow) if !allow.contains(&id) => FilterDecision::NotAllowed,
            _ => FilterDecision::Enabled,
        }
    }

    /// Whether the id should be exposed.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.evaluate(id) == FilterDecision::Enabled
    }

    /// Whether an allow-list restriction is in effect.
    pub fn has_allow_list(&self) -> bool {
        self.allow.is_some()
    }

    /// Number of ids in the deny-set.
    pub fn denied_count(&self) -> usize {
        self.deny.len()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}
