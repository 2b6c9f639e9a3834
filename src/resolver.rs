//! Free-text restaurant name resolution

use crate::catalog::CatalogStore;

/// Resolve a user-supplied restaurant name to a catalog row index.
///
/// Exact (case-sensitive) lookup first. Otherwise a linear scan in stored
/// order, matching when the case-insensitive query is a substring of the
/// candidate name or vice versa; the first match wins.
///
/// Known limitation: the substring fallback is order-dependent — a short
/// generic query that matches many rows returns whichever comes first in the
/// catalog, not the closest name.
pub fn resolve(query: &str, catalog: &CatalogStore) -> Option<usize> {
    if let Some(index) = catalog.exact_index_of(query) {
        return Some(index);
    }

    let query_lower = query.to_lowercase();
    for row in catalog.rows() {
        let name_lower = row.name.to_lowercase();
        if name_lower.contains(&query_lower) || query_lower.contains(&name_lower) {
            return Some(row.index);
        }
    }

    None
}
