use crate::core::catalog::entry::CatalogEntry;
use crate::core::catalog::registry::Catalog;
use std::sync::Arc;

/// Selects the entries matching `query`, sorted by name.
///
/// An empty query matches every entry. Otherwise an entry matches when the
/// lower-cased query is a substring of its lower-cased name, formula, CAS
/// number or source database. Matching is plain containment; the query is not
/// tokenized or trimmed.
///
/// The result is always sorted by name in ascending (byte-wise) order,
/// whatever order `entries` arrive in. The function keeps no state between
/// calls.
pub fn filter<'a, I>(entries: I, query: &str) -> Vec<Arc<CatalogEntry>>
where
    I: IntoIterator<Item = &'a Arc<CatalogEntry>>,
{
    let needle = query.to_lowercase();
    let mut matched: Vec<Arc<CatalogEntry>> = entries
        .into_iter()
        .filter(|entry| needle.is_empty() || entry.matches_lowercase(&needle))
        .cloned()
        .collect();
    sort_by_name(&mut matched);
    matched
}

/// Filters the whole catalog.
pub fn filter_catalog(catalog: &Catalog, query: &str) -> Vec<Arc<CatalogEntry>> {
    filter(catalog.entries(), query)
}

pub fn sort_by_name(entries: &mut [Arc<CatalogEntry>]) {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
}
