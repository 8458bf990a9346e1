// Top-term extraction — a document's K most characteristic terms.
//
// Hash-map iteration order is not a tie-break. The comparator is explicit:
// relative frequency descending, then token lexicographic ascending, so
// the same score map always produces the same list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// A term with its relative frequency, as ranked within one document.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub score: f64,
}

/// The ordered top-K term list of one document. Scores are retained so the
/// frequency report can show (rank, term, score) without re-deriving them.
#[derive(Debug, Clone, Default)]
pub struct TopTerms {
    pub terms: Vec<RankedTerm>,
}

impl TopTerms {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The terms as a set, for overlap membership tests.
    pub fn term_set(&self) -> HashSet<&str> {
        self.terms.iter().map(|t| t.term.as_str()).collect()
    }
}

/// Rank a document's score map and keep the top `k` entries.
///
/// The result length is min(k, distinct tokens) — a document with fewer
/// distinct terms than `k` simply yields a shorter list.
pub fn extract_top_terms(scores: &HashMap<String, f64>, k: usize) -> TopTerms {
    let mut ranked: Vec<RankedTerm> = scores
        .iter()
        .map(|(term, score)| RankedTerm {
            term: term.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.term.cmp(&b.term))
    });
    ranked.truncate(k);
    TopTerms { terms: ranked }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(t, s)| (t.to_string(), *s)).collect()
    }

    #[test]
    fn sorts_by_score_descending() {
        let top = extract_top_terms(&scores(&[("low", 0.1), ("high", 0.5), ("mid", 0.3)]), 10);
        let order: Vec<&str> = top.terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let top = extract_top_terms(
            &scores(&[("banana", 0.25), ("apple", 0.25), ("cherry", 0.25), ("date", 0.25)]),
            10,
        );
        let order: Vec<&str> = top.terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(order, vec!["apple", "banana", "cherry", "date"]);
    }

    #[test]
    fn truncates_to_k() {
        let top = extract_top_terms(&scores(&[("a", 0.4), ("b", 0.3), ("c", 0.2), ("d", 0.1)]), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top.terms[0].term, "a");
        assert_eq!(top.terms[1].term, "b");
    }

    #[test]
    fn shorter_than_k_keeps_everything() {
        let top = extract_top_terms(&scores(&[("a", 0.6), ("b", 0.4)]), 100);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn empty_scores_give_empty_list() {
        let top = extract_top_terms(&HashMap::new(), 100);
        assert!(top.is_empty());
    }

    #[test]
    fn term_set_contains_all_terms() {
        let top = extract_top_terms(&scores(&[("a", 0.6), ("b", 0.4)]), 100);
        let set = top.term_set();
        assert!(set.contains("a") && set.contains("b"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn same_input_same_order() {
        let map = scores(&[("x", 0.2), ("y", 0.2), ("z", 0.6)]);
        let first: Vec<String> = extract_top_terms(&map, 3)
            .terms
            .into_iter()
            .map(|t| t.term)
            .collect();
        let second: Vec<String> = extract_top_terms(&map, 3)
            .terms
            .into_iter()
            .map(|t| t.term)
            .collect();
        assert_eq!(first, second);
    }
}
