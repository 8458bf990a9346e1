// Document source — swap-ready abstraction over document storage.
//
// The pipeline only ever asks "give me the raw text for this id". Where
// that text lives (a directory of files here, an object store or an HTTP
// endpoint elsewhere) is the source's business, which also keeps the
// pipeline testable with an in-memory map.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Trait for fetching raw document text by id.
///
/// `Ok(None)` means the document does not exist — a recoverable condition
/// the loader answers with a skip, never an abort.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<String>>;
}

/// Filesystem-backed source: each document id is a file name under a
/// fixed corpus directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Enumerate the `.txt` files in the corpus directory, sorted by name.
    /// Used when the caller does not inject an explicit document list.
    pub async fn list_documents(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("failed to read corpus directory {}", self.root.display()))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "txt") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    ids.push(name.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    async fn fetch(&self, id: &str) -> Result<Option<String>> {
        let path = self.root.join(id);
        match tokio::fs::read(&path).await {
            // Lossy decode: a stray non-UTF-8 byte should not cost us the
            // whole document
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }
}
