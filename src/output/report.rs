// Report builders — the three text artifacts plus the JSON dump.
//
// Each builder returns the complete artifact as one string. Everything is
// ordered deterministically (documents and pairs by key, top pairs by
// score descending with the pair key as tie-break), so two runs over the
// same corpus produce byte-identical reports.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::similarity::PairKey;
use crate::analysis::top_terms::{RankedTerm, TopTerms};

pub const FREQUENCY_REPORT: &str = "word_frequencies.txt";
pub const MATRIX_REPORT: &str = "similarity_matrix.txt";
pub const TOP_PAIRS_REPORT: &str = "top_similar_pairs.txt";
pub const JSON_REPORT: &str = "analysis.json";

/// Token totals for one document, kept for the machine-readable dump.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DocumentStats {
    pub total_tokens: u64,
    pub distinct_tokens: usize,
}

/// Per-document ranked term-frequency listing.
pub fn frequency_report(top_terms: &BTreeMap<String, TopTerms>) -> String {
    let mut out = String::new();
    out.push_str("Most Common Words per Document\n");
    out.push_str("==============================\n\n");

    for (id, top) in top_terms {
        out.push_str(&format!("Document: {id}\n"));
        out.push_str(&format!("{}\n", "-".repeat(60)));
        for (rank, term) in top.terms.iter().enumerate() {
            out.push_str(&format!(
                "{:>4}. {} (frequency: {:.6})\n",
                rank + 1,
                term.term,
                term.score
            ));
        }
        out.push('\n');
    }
    out
}

/// Full pairwise similarity listing, one line per unordered pair, in
/// pair-key order.
pub fn matrix_report(scores: &BTreeMap<PairKey, f64>) -> String {
    let mut out = String::new();
    out.push_str("Pairwise Similarity Matrix\n");
    out.push_str("==========================\n\n");

    for (pair, score) in scores {
        out.push_str(&format!("{pair}: {score:.6}\n"));
    }
    out
}

/// The `n` highest-scoring pairs: score descending, pair key ascending on
/// ties. Returns fewer when fewer pairs exist.
pub fn top_pairs(scores: &BTreeMap<PairKey, f64>, n: usize) -> Vec<(&PairKey, f64)> {
    let mut pairs: Vec<(&PairKey, f64)> = scores.iter().map(|(k, s)| (k, *s)).collect();
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    pairs.truncate(n);
    pairs
}

/// Ranked listing of the most similar pairs.
pub fn top_pairs_report(scores: &BTreeMap<PairKey, f64>, n: usize) -> String {
    let mut out = String::new();
    out.push_str("Most Similar Document Pairs\n");
    out.push_str("---------------------------\n");

    for (rank, (pair, score)) in top_pairs(scores, n).iter().enumerate() {
        out.push_str(&format!("{:>3}. {pair} (score: {score:.6})\n", rank + 1));
    }
    out
}

#[derive(Serialize)]
struct DocumentDump<'a> {
    id: &'a str,
    total_tokens: u64,
    distinct_tokens: usize,
    top_terms: &'a [RankedTerm],
}

#[derive(Serialize)]
struct PairDump<'a> {
    first: &'a str,
    second: &'a str,
    score: f64,
}

#[derive(Serialize)]
struct AnalysisDump<'a> {
    documents: Vec<DocumentDump<'a>>,
    pairs: Vec<PairDump<'a>>,
}

/// Machine-readable dump of the whole run: every loaded document with its
/// totals and top terms (empty for documents skipped at normalization),
/// and every pair score.
pub fn json_report(
    stats: &BTreeMap<String, DocumentStats>,
    top_terms: &BTreeMap<String, TopTerms>,
    scores: &BTreeMap<PairKey, f64>,
) -> Result<String> {
    let dump = AnalysisDump {
        documents: stats
            .iter()
            .map(|(id, s)| DocumentDump {
                id,
                total_tokens: s.total_tokens,
                distinct_tokens: s.distinct_tokens,
                top_terms: top_terms.get(id).map(|t| t.terms.as_slice()).unwrap_or(&[]),
            })
            .collect(),
        pairs: scores
            .iter()
            .map(|(pair, score)| PairDump {
                first: &pair.first,
                second: &pair.second,
                score: *score,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&dump).context("failed to serialize analysis dump")
}
