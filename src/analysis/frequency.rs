// Frequency counting and score normalization.
//
// A document's raw counts and its total token count live in one struct
// with two fields. The total is never smuggled into the count map under a
// reserved key — no real token can collide with it because there is
// nothing to collide with.

use std::collections::HashMap;

/// Per-document term counts plus the total token count.
#[derive(Debug, Clone, Default)]
pub struct FrequencyProfile {
    /// Raw occurrence count per distinct token
    pub counts: HashMap<String, u64>,
    /// Total tokens in the document (sum of all counts)
    pub total: u64,
}

impl FrequencyProfile {
    pub fn distinct_tokens(&self) -> usize {
        self.counts.len()
    }
}

/// Tally token occurrences into a frequency profile.
pub fn count_tokens(tokens: &[String]) -> FrequencyProfile {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    FrequencyProfile {
        counts,
        total: tokens.len() as u64,
    }
}

/// Convert raw counts into relative frequencies (count / total).
///
/// Returns `None` for a document with zero surviving tokens — dividing by
/// zero is the caller's cue to skip the document, not abort the run.
/// When `Some`, the returned values sum to 1.0 within floating-point
/// tolerance.
pub fn normalize(profile: &FrequencyProfile) -> Option<HashMap<String, f64>> {
    if profile.total == 0 {
        return None;
    }
    let total = profile.total as f64;
    Some(
        profile
            .counts
            .iter()
            .map(|(token, count)| (token.clone(), *count as f64 / total))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn counts_match_occurrences() {
        let profile = count_tokens(&seq(&["cat", "dog", "cat", "cat"]));
        assert_eq!(profile.counts["cat"], 3);
        assert_eq!(profile.counts["dog"], 1);
        assert_eq!(profile.distinct_tokens(), 2);
    }

    #[test]
    fn total_equals_sequence_length_and_count_sum() {
        let tokens = seq(&["a", "b", "a", "c", "b", "a"]);
        let profile = count_tokens(&tokens);
        assert_eq!(profile.total, tokens.len() as u64);
        assert_eq!(profile.counts.values().sum::<u64>(), profile.total);
    }

    #[test]
    fn empty_sequence_gives_zero_total() {
        let profile = count_tokens(&[]);
        assert_eq!(profile.total, 0);
        assert!(profile.counts.is_empty());
    }

    #[test]
    fn normalized_scores_sum_to_one() {
        let profile = count_tokens(&seq(&["x", "y", "x", "z", "x"]));
        let scores = normalize(&profile).unwrap();
        let sum: f64 = scores.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "scores sum to {sum}");
        assert!((scores["x"] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn normalize_skips_empty_document() {
        assert!(normalize(&FrequencyProfile::default()).is_none());
    }

    #[test]
    fn normalized_scores_stay_in_unit_interval() {
        let profile = count_tokens(&seq(&["a", "a", "a", "b"]));
        let scores = normalize(&profile).unwrap();
        for score in scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }
}
