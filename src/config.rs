use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use stop_words::{get, LANGUAGE};

/// Central run configuration loaded from environment variables.
///
/// Every setting has a CONCORD_* env var (the .env file is loaded
/// automatically at startup via dotenvy) and can be overridden by a
/// CLI flag. Nothing here is mutated once the pipeline starts.
pub struct Config {
    /// Directory holding the corpus documents (one text file per document)
    pub corpus_dir: PathBuf,
    /// Directory the report files are written to (created on demand)
    pub output_dir: PathBuf,
    /// How many top terms to keep per document (K)
    pub top_terms: usize,
    /// How many most-similar pairs to list in the top-pairs report (N)
    pub top_pairs: usize,
    /// How many worker tasks run concurrently within each stage
    pub concurrency: usize,
    /// Optional file with one stop word per line, replacing the built-in
    /// English list from the stop-words crate
    pub stop_words_path: Option<PathBuf>,
    /// Also write a machine-readable analysis.json next to the text reports
    pub write_json: bool,
}

impl Config {
    /// Load configuration from environment variables, with defaults that
    /// match the classic book-analysis layout (./books → ./output).
    pub fn load() -> Result<Self> {
        Ok(Self {
            corpus_dir: env::var("CONCORD_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./books")),
            output_dir: env::var("CONCORD_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
            top_terms: env_usize("CONCORD_TOP_TERMS", 100)?,
            top_pairs: env_usize("CONCORD_TOP_PAIRS", 10)?,
            concurrency: env_usize("CONCORD_CONCURRENCY", 8)?,
            stop_words_path: env::var("CONCORD_STOP_WORDS").map(PathBuf::from).ok(),
            write_json: false,
        })
    }

    /// Reject configurations that cannot produce a meaningful run.
    /// Called before any work begins — a bad cutoff fails fast, never mid-run.
    pub fn validate(&self) -> Result<()> {
        if self.top_terms == 0 {
            anyhow::bail!("top-terms cutoff must be at least 1, got 0");
        }
        if self.top_pairs == 0 {
            anyhow::bail!("top-pairs cutoff must be at least 1, got 0");
        }
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1, got 0");
        }
        Ok(())
    }

    /// Build the stop-word set: the override file if configured, otherwise
    /// the English list from the stop-words crate. Entries are lowercased
    /// so they match tokens after case folding.
    pub fn stop_words(&self) -> Result<HashSet<String>> {
        match &self.stop_words_path {
            Some(path) => {
                let raw = fs::read_to_string(path).with_context(|| {
                    format!("failed to read stop-word file {}", path.display())
                })?;
                Ok(raw
                    .lines()
                    .map(|line| line.trim().to_lowercase())
                    .filter(|line| !line.is_empty())
                    .collect())
            }
            None => Ok(get(LANGUAGE::English)
                .into_iter()
                .map(|w| w.to_lowercase())
                .collect()),
        }
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
