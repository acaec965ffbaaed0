//! Candidate term extraction for one selection event.

use std::collections::HashSet;

use recall_core::config::defaults::{DEFAULT_MAX_TERMS_PER_SELECTION, DEFAULT_MIN_TERM_LENGTH};

/// Up to 3 learnable terms from a query, using default limits.
///
/// Terms are lowercased and trimmed, then dropped when shorter than 3
/// characters, denylisted, already an organic trigger of the memory, or
/// free of ASCII letters and digits. Order is preserved; duplicates collapse.
pub fn extract_learnable_terms<Q, E>(
    query_terms: &[Q],
    existing_triggers: &[E],
    denylist: &HashSet<&str>,
) -> Vec<String>
where
    Q: AsRef<str>,
    E: AsRef<str>,
{
    extract_with_limits(
        query_terms,
        existing_triggers,
        denylist,
        DEFAULT_MIN_TERM_LENGTH,
        DEFAULT_MAX_TERMS_PER_SELECTION,
    )
}

/// [`extract_learnable_terms`] with explicit limits.
pub fn extract_with_limits<Q, E>(
    query_terms: &[Q],
    existing_triggers: &[E],
    denylist: &HashSet<&str>,
    min_term_length: usize,
    max_terms: usize,
) -> Vec<String>
where
    Q: AsRef<str>,
    E: AsRef<str>,
{
    let existing: HashSet<String> = existing_triggers
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .collect();

    let mut seen = HashSet::new();
    query_terms
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|term| {
            term.chars().count() >= min_term_length
                && !denylist.contains(term.as_str())
                && !existing.contains(term)
                && term.chars().any(|c| c.is_ascii_alphanumeric())
        })
        .filter(|term| seen.insert(term.clone()))
        .take(max_terms)
        .collect()
}
