//! Query-time matching of learned triggers. Pure functions; the engine feeds
//! them rows from the store.

use recall_core::memory::{MemoryId, TermEntry};

use crate::denylist::is_on_denylist;
use crate::outcome::LearnedTriggerMatch;

/// Whitespace-split, lowercased query terms that are long enough and not denylisted.
/// Repeats are kept: they count toward the weight denominator.
pub fn query_terms(query: &str, min_term_length: usize) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= min_term_length && !is_on_denylist(t))
        .map(str::to_string)
        .collect()
}

/// Match one memory's entries against the query terms.
///
/// An entry matches when either string contains the other. Entries with
/// `expires_at <= now_secs` never match.
pub fn match_memory(
    memory_id: MemoryId,
    entries: &[TermEntry],
    query_terms: &[String],
    now_secs: i64,
    base_weight: f64,
) -> Option<LearnedTriggerMatch> {
    if query_terms.is_empty() {
        return None;
    }
    let matched_terms: Vec<String> = entries
        .iter()
        .filter(|e| !e.is_expired(now_secs))
        .filter(|e| {
            query_terms
                .iter()
                .any(|q| e.term.contains(q.as_str()) || q.contains(e.term.as_str()))
        })
        .map(|e| e.term.clone())
        .collect();

    if matched_terms.is_empty() {
        return None;
    }
    let weight = base_weight * matched_terms.len() as f64 / query_terms.len() as f64;
    Some(LearnedTriggerMatch {
        memory_id,
        matched_terms,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: i64 = 30 * 86_400;

    fn entry(term: &str, now: i64) -> TermEntry {
        TermEntry::new(term, "q", now, TTL)
    }

    #[test]
    fn query_terms_filter_short_and_denylisted() {
        assert_eq!(
            query_terms("The Authentication  of K8s system", 3),
            vec!["authentication", "k8s", "system"]
        );
        assert!(query_terms("a an the", 3).is_empty());
    }

    #[test]
    fn substring_either_direction() {
        let now = 1_000;
        let terms = vec!["auth".to_string()];
        let m = match_memory(1, &[entry("authentication", now)], &terms, now, 0.7).unwrap();
        assert_eq!(m.matched_terms, vec!["authentication"]);

        let terms = vec!["authentication".to_string()];
        assert!(match_memory(1, &[entry("auth", now)], &terms, now, 0.7).is_some());
    }

    #[test]
    fn weight_scales_with_coverage() {
        let now = 1_000;
        let terms = vec!["redis".to_string(), "cache".to_string()];
        let m = match_memory(7, &[entry("redis", now)], &terms, now, 0.7).unwrap();
        assert!((m.weight - 0.35).abs() < 1e-12);
    }

    #[test]
    fn several_entries_on_one_term_exceed_base() {
        let now = 1_000;
        let terms = vec!["auth".to_string()];
        let entries = [entry("oauth", now), entry("authn", now), entry("authz", now)];
        let m = match_memory(1, &entries, &terms, now, 0.7).unwrap();
        assert_eq!(m.matched_terms.len(), 3);
        assert!((m.weight - 2.1).abs() < 1e-12);
    }

    #[test]
    fn expired_at_boundary_does_not_match() {
        let e = TermEntry::new("redis", "q", 0, 100);
        let terms = vec!["redis".to_string()];
        assert!(match_memory(1, &[e.clone()], &terms, 99, 0.7).is_some());
        assert!(match_memory(1, &[e], &terms, 100, 0.7).is_none());
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(match_memory(1, &[entry("redis", 0)], &[], 0, 0.7).is_none());
    }
}
