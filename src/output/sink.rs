// Report sink — swap-ready abstraction over report persistence.
//
// Reports are built fully in memory and handed over as one string per
// artifact, so a sink either writes a complete file or fails without
// leaving a half-written one behind. A write failure is fatal, but it can
// only happen after all computation has finished.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Trait for persisting a named, fully-built report.
pub trait ReportSink: Send + Sync {
    fn write(&self, name: &str, contents: &str) -> Result<()>;
}

/// Filesystem sink: one file per report under a fixed output directory,
/// created on demand.
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FsSink {
    fn write(&self, name: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory {}", self.dir.display())
        })?;
        // Write to a sibling temp file, then rename over the target: a
        // failed write leaves the old report intact, never a truncated one
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        fs::write(&tmp, contents)
            .with_context(|| format!("failed to write report {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move report into place at {}", path.display()))
    }
}
