//! Search term generation for directory entities.

use std::collections::BTreeSet;

/// Shortest name prefix that gets indexed.
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Longest name prefix that gets indexed.
pub const MAX_PREFIX_LENGTH: usize = 10;

/// Generate the lower-cased terms an entity is reachable under.
///
/// The set contains:
/// - the full trimmed `name`, `city` and `state` (each if non-empty),
/// - every whitespace-delimited token of `name` longer than one character,
/// - every prefix of length 2..=10 of `name` with non-alphanumeric characters
///   removed, so partially typed queries hit the entity.
///
/// A non-blank `name` always yields at least one term.
pub fn generate_search_terms(name: &str, city: &str, state: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();

    for field in [name, city, state] {
        let normalized = field.trim().to_lowercase();
        if !normalized.is_empty() {
            terms.insert(normalized);
        }
    }

    let name_lower = name.trim().to_lowercase();

    for token in name_lower.split_whitespace() {
        if token.chars().count() > 1 {
            terms.insert(token.to_string());
        }
    }

    let compact: Vec<char> = name_lower.chars().filter(|c| c.is_alphanumeric()).collect();
    let longest = compact.len().min(MAX_PREFIX_LENGTH);
    for len in MIN_PREFIX_LENGTH..=longest {
        terms.insert(compact[..len].iter().collect());
    }

    terms
}
