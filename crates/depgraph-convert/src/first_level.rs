//! Index of user-declared first-level dependencies.
//!
//! The resolution engine distinguishes modules by more attributes than
//! depgraph does, so report identities are projected with
//! [`ModuleId::normalize`] before they are looked up here.

use depgraph_core::dependency::DeclaredDependency;
use depgraph_core::module::{ModuleId, ModuleKey};
use indexmap::IndexMap;

/// Declared dependencies keyed by reduced identity, then by configuration.
#[derive(Debug, Clone, Default)]
pub struct FirstLevelIndex {
    by_key: IndexMap<ModuleKey, IndexMap<String, DeclaredDependency>>,
}

impl FirstLevelIndex {
    /// Build the index. A later declaration for the same module and
    /// configuration replaces an earlier one.
    pub fn new<'a, I>(declared: I) -> Self
    where
        I: IntoIterator<Item = &'a DeclaredDependency>,
    {
        let mut by_key: IndexMap<ModuleKey, IndexMap<String, DeclaredDependency>> =
            IndexMap::new();
        for dep in declared {
            by_key
                .entry(dep.key())
                .or_default()
                .insert(dep.configuration.clone(), dep.clone());
        }
        Self { by_key }
    }

    /// The declaration a report node in `configuration` corresponds to, if any.
    pub fn lookup(&self, id: &ModuleId, configuration: &str) -> Option<&DeclaredDependency> {
        self.by_key.get(&id.normalize())?.get(configuration)
    }

    /// All declarations for a reduced identity.
    pub fn declarations(&self, key: &ModuleKey) -> Option<&IndexMap<String, DeclaredDependency>> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
