// Corpus loader — concurrent fetch + tokenize per document.
//
// All fetches are independent, so they fan out over a bounded worker pool
// and fan back in before the stage completes. A missing or unreadable
// document is logged and skipped; it simply never appears in any
// downstream map.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tracing::warn;

use crate::analysis::tokenize::tokenize;

use super::source::DocumentSource;

/// Fetch and tokenize every document in `ids`, up to `concurrency` at a
/// time. Returns id → token sequence for the documents that could be read;
/// the `BTreeMap` fixes iteration order for everything downstream.
pub async fn load_corpus(
    source: Arc<dyn DocumentSource>,
    ids: &[String],
    stop_words: Arc<HashSet<String>>,
    concurrency: usize,
    progress: &ProgressBar,
) -> BTreeMap<String, Vec<String>> {
    let results: Vec<Option<(String, Vec<String>)>> = stream::iter(ids.iter().cloned())
        .map(|id| {
            let source = Arc::clone(&source);
            let stop_words = Arc::clone(&stop_words);
            let progress = progress.clone();
            async move {
                let result = match source.fetch(&id).await {
                    Ok(Some(text)) => Some((id, tokenize(&text, &stop_words))),
                    Ok(None) => {
                        warn!(document = %id, "Document not found, skipping");
                        None
                    }
                    Err(e) => {
                        warn!(document = %id, error = %e, "Failed to fetch document, skipping");
                        None
                    }
                };
                progress.inc(1);
                result
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    // Merge after the fan-in barrier — no locks, each worker owned its result
    results.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MemorySource {
        docs: HashMap<String, String>,
        fail: HashSet<String>,
    }

    #[async_trait]
    impl DocumentSource for MemorySource {
        async fn fetch(&self, id: &str) -> Result<Option<String>> {
            if self.fail.contains(id) {
                anyhow::bail!("simulated read failure");
            }
            Ok(self.docs.get(id).cloned())
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn loads_and_tokenizes_available_documents() {
        let source = Arc::new(MemorySource {
            docs: HashMap::from([("a".to_string(), "Cats and Dogs!".to_string())]),
            fail: HashSet::new(),
        });
        let stops: Arc<HashSet<String>> = Arc::new(["and".to_string()].into());

        let corpus =
            load_corpus(source, &ids(&["a"]), stops, 4, &ProgressBar::hidden()).await;
        assert_eq!(corpus["a"], vec!["cats", "dogs"]);
    }

    #[tokio::test]
    async fn missing_and_failing_documents_are_skipped() {
        let source = Arc::new(MemorySource {
            docs: HashMap::from([("good".to_string(), "alpha beta".to_string())]),
            fail: ["broken".to_string()].into(),
        });
        let stops = Arc::new(HashSet::new());

        let corpus = load_corpus(
            source,
            &ids(&["good", "missing", "broken"]),
            stops,
            4,
            &ProgressBar::hidden(),
        )
        .await;

        assert_eq!(corpus.len(), 1);
        assert!(corpus.contains_key("good"));
    }
}
