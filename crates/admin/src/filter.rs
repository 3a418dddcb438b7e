//! Client-side search over fetched collections.
//!
//! A query matches an entity when any of its search fields contains the
//! query as a case-insensitive substring. Results keep the source order and
//! an empty (or all-whitespace) query matches everything.

/// Entities that expose string fields to free-text search.
pub trait Searchable {
    /// Fields consulted by [`matches`]. Order does not matter.
    fn search_fields(&self) -> Vec<&str>;
}

/// Lowercased, trimmed query; `None` when the query is blank.
fn normalize(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Whether `item` matches `query`.
#[must_use]
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    normalize(query).is_none_or(|needle| matches_normalized(item, &needle))
}

fn matches_normalized<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// The subsequence of `items` matching `query`, in source order.
#[must_use]
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    match normalize(query) {
        None => items.iter().collect(),
        Some(needle) => items
            .iter()
            .filter(|item| matches_normalized(*item, &needle))
            .collect(),
    }
}
