//! Case-insensitive name filtering for displayed items.
//!
//! Filtering only decides what is shown; the tracker's lists and storage
//! are never touched.

/// Whether `name` contains `query`, ignoring case and surrounding whitespace
pub fn matches(name: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || name.trim().to_lowercase().contains(&query)
}
