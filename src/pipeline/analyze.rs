// The batch analysis pipeline: load → count → normalize → rank → compare
// → report.
//
// Stages are strictly sequential — each one fans out per-document (or
// per-partition) workers and fans back in before the next begins. Workers
// return owned results and the merge into the stage's ordered map happens
// after the barrier, so no stage needs a lock. Determinism comes from the
// data model (ordered maps, explicit tie-breaks), never from execution
// order.
//
// Per-document failures (unreadable file, nothing left after filtering)
// are logged and skipped. Only configuration and report-write failures
// are fatal, and the latter can only happen after analysis is done.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::analysis::frequency::{self, FrequencyProfile};
use crate::analysis::similarity;
use crate::analysis::top_terms::{self, TopTerms};
use crate::config::Config;
use crate::corpus::loader;
use crate::corpus::source::DocumentSource;
use crate::output::report::{self, DocumentStats};
use crate::output::sink::ReportSink;
use crate::output::terminal;

/// What a run produced, for the terminal summary and the caller.
pub struct RunSummary {
    /// Documents that made it all the way to a top-term list
    pub documents_analyzed: usize,
    /// Documents dropped along the way (unreadable, missing, or empty
    /// after filtering)
    pub documents_skipped: usize,
    /// Unordered pairs scored
    pub pairs_compared: usize,
}

/// Run the full analysis over the given document ids and write the
/// reports. Returns the run summary.
pub async fn run(
    source: Arc<dyn DocumentSource>,
    ids: &[String],
    config: &Config,
    sink: &dyn ReportSink,
) -> Result<RunSummary> {
    config.validate()?;
    let stop_words = Arc::new(config.stop_words()?);
    let concurrency = config.concurrency;

    // Duplicate ids in an injected list collapse into one document
    // downstream; dedupe up front so the skip count stays honest
    let mut ids: Vec<String> = ids.to_vec();
    ids.sort();
    ids.dedup();
    let ids = ids;

    // Stage 1: fetch + tokenize, one worker per document
    info!(documents = ids.len(), "Loading corpus");
    println!("Loading {} documents...", ids.len());
    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Loading [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );
    let corpus =
        loader::load_corpus(Arc::clone(&source), &ids, stop_words, concurrency, &pb).await;
    pb.finish_and_clear();

    let unreadable = ids.len() - corpus.len();
    info!(loaded = corpus.len(), skipped = unreadable, "Corpus loaded");

    // Stage 2: count term occurrences, one worker per document
    println!("Counting words in {} documents...", corpus.len());
    let counted: Vec<(String, FrequencyProfile)> = stream::iter(corpus)
        .map(|(id, tokens)| {
            tokio::spawn(async move {
                let profile = frequency::count_tokens(&tokens);
                (id, profile)
            })
        })
        .buffer_unordered(concurrency)
        .map(|joined| joined.context("frequency worker panicked"))
        .try_collect()
        .await?;
    let profiles: BTreeMap<String, FrequencyProfile> = counted.into_iter().collect();

    // Token totals survive past normalization for the JSON dump
    let stats: BTreeMap<String, DocumentStats> = profiles
        .iter()
        .map(|(id, p)| {
            (
                id.clone(),
                DocumentStats {
                    total_tokens: p.total,
                    distinct_tokens: p.distinct_tokens(),
                },
            )
        })
        .collect();

    // Stage 3: normalize counts into relative frequencies
    println!("Normalizing word scores...");
    let normalized: Vec<Option<(String, _)>> = stream::iter(profiles)
        .map(|(id, profile)| {
            tokio::spawn(async move {
                match frequency::normalize(&profile) {
                    Some(scores) => Some((id, scores)),
                    None => {
                        warn!(document = %id, "No tokens survived filtering, skipping");
                        None
                    }
                }
            })
        })
        .buffer_unordered(concurrency)
        .map(|joined| joined.context("normalization worker panicked"))
        .try_collect()
        .await?;
    let mut empty = 0;
    let score_maps: BTreeMap<String, _> = normalized
        .into_iter()
        .filter_map(|result| {
            if result.is_none() {
                empty += 1;
            }
            result
        })
        .collect();

    // Stage 4: rank each document's terms and keep the top K
    println!(
        "Extracting the top {} terms per document...",
        config.top_terms
    );
    let k = config.top_terms;
    let extracted: Vec<(String, TopTerms)> = stream::iter(score_maps)
        .map(|(id, scores)| {
            tokio::spawn(async move { (id, top_terms::extract_top_terms(&scores, k)) })
        })
        .buffer_unordered(concurrency)
        .map(|joined| joined.context("extraction worker panicked"))
        .try_collect()
        .await?;
    let ranked: Arc<BTreeMap<String, TopTerms>> = Arc::new(extracted.into_iter().collect());

    // Stage 5: score every unordered pair, partitioned by outer index
    let pair_count = ranked.len().saturating_sub(1) * ranked.len() / 2;
    println!(
        "Comparing {} documents ({} pairs)...",
        ranked.len(),
        pair_count
    );
    let scores = similarity::score_all_pairs(Arc::clone(&ranked), k, concurrency).await?;
    info!(pairs = scores.len(), "Similarity scoring complete");

    // Stage 6: build every report in memory, then flush each in one write
    println!("Writing reports...");
    sink.write(
        report::FREQUENCY_REPORT,
        &report::frequency_report(&ranked),
    )?;
    sink.write(report::MATRIX_REPORT, &report::matrix_report(&scores))?;
    sink.write(
        report::TOP_PAIRS_REPORT,
        &report::top_pairs_report(&scores, config.top_pairs),
    )?;
    if config.write_json {
        sink.write(
            report::JSON_REPORT,
            &report::json_report(&stats, &ranked, &scores)?,
        )?;
    }

    let summary = RunSummary {
        documents_analyzed: ranked.len(),
        documents_skipped: unreadable + empty,
        pairs_compared: scores.len(),
    };
    terminal::display_run(&summary, &report::top_pairs(&scores, config.top_pairs));
    Ok(summary)
}
