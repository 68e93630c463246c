use crate::core::catalog::entry::CatalogEntry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The compounds currently active in a simulation context.
///
/// Keys are compound names and always name catalog entries. The set is only
/// ever changed one key at a time by the selection synchronizer; it is never
/// replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct SelectedSet {
    entries: BTreeMap<String, Arc<CatalogEntry>>,
}

impl SelectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CatalogEntry>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<CatalogEntry>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert(&mut self, entry: Arc<CatalogEntry>) -> Option<Arc<CatalogEntry>> {
        self.entries.insert(entry.name.clone(), entry)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<CatalogEntry>> {
        self.entries.remove(name)
    }
}
