// Pairwise similarity — overlap of two documents' top-term lists.
//
// Every unordered pair of analyzed documents gets one score:
//
//   score = |top_terms(A) ∩ top_terms(B)| / K
//
// The divisor is the configured K, not the smaller list length, so a
// document with fewer than K distinct terms is not penalized beyond its
// natural term scarcity. The pair triangle is partitioned by outer index:
// each worker owns every pair starting at its index, computes them without
// touching shared state, and the rows are merged after the fan-in barrier.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

use super::top_terms::TopTerms;

/// Canonical unordered pair of document ids.
///
/// Construction orders the two ids lexicographically, so (A, B) and (B, A)
/// are the same key and a `BTreeMap<PairKey, _>` iterates pairs in a fixed
/// order regardless of how they were produced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub first: String,
    pub second: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// Score one pair: shared top terms divided by the configured K.
/// Membership test over sets — positions within the lists don't matter.
pub fn pair_score(a: &TopTerms, b: &TopTerms, k: usize) -> f64 {
    let b_set = b.term_set();
    let common = a
        .terms
        .iter()
        .filter(|t| b_set.contains(t.term.as_str()))
        .count();
    common as f64 / k as f64
}

/// Score every unordered pair of documents that have a top-term list.
///
/// Fans out one worker per outer index of the pair triangle; worker `i`
/// computes pairs (i, i+1..n) and returns its row. No two workers ever
/// compute the same pair, and the shared score map is only written here,
/// after all workers have finished.
pub async fn score_all_pairs(
    top_terms: Arc<BTreeMap<String, TopTerms>>,
    k: usize,
    concurrency: usize,
) -> Result<BTreeMap<PairKey, f64>> {
    let ids: Arc<Vec<String>> = Arc::new(top_terms.keys().cloned().collect());

    let rows: Vec<Vec<(PairKey, f64)>> = stream::iter(0..ids.len())
        .map(|i| {
            let ids = Arc::clone(&ids);
            let top_terms = Arc::clone(&top_terms);
            tokio::spawn(async move {
                let a = &top_terms[&ids[i]];
                let mut row = Vec::with_capacity(ids.len() - i - 1);
                for j in (i + 1)..ids.len() {
                    let b = &top_terms[&ids[j]];
                    row.push((PairKey::new(&ids[i], &ids[j]), pair_score(a, b, k)));
                }
                row
            })
        })
        .buffer_unordered(concurrency)
        .map(|joined| joined.context("similarity worker panicked"))
        .try_collect()
        .await?;

    let mut scores = BTreeMap::new();
    for row in rows {
        for (key, score) in row {
            scores.insert(key, score);
        }
    }
    Ok(scores)
}
