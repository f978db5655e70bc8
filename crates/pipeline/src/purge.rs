//! Corpus cleanup.

use std::path::Path;

use tracing::{info, warn};

use fakturo_documents::filename;

use crate::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgeReport {
    pub deleted: u64,
    pub failed: u64,
}

/// Delete every corpus file (primary XML and sidecar JSON) in `dir`,
/// non-recursively. Other files are left alone; a missing directory is an
/// empty corpus, not an error.
pub async fn purge(dir: &Path) -> Result<PurgeReport, PipelineError> {
    let mut report = PurgeReport::default();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(report),
        Err(err) => return Err(err.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !filename::is_corpus_file(&path) {
            continue;
        }
        match tokio::fs::remove_file(&path).await {
            Ok(()) => report.deleted += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not delete");
                report.failed += 1;
            }
        }
    }
    info!(deleted = report.deleted, failed = report.failed, "purge finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_directory_is_an_empty_corpus() {
        let report = purge(Path::new("/definitely/not/here")).await.unwrap();
        assert_eq!(report, PurgeReport::default());
    }

    #[tokio::test]
    async fn purge_spares_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Invoice_INV-1_20250101.xml"), b"<Invoice/>").unwrap();
        std::fs::write(dir.path().join("Invoice_INV-1_20250101.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("summary.csv"), b"a,b").unwrap();

        let report = purge(dir.path()).await.unwrap();
        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed, 0);
        assert!(dir.path().join("summary.csv").exists());
        assert!(!dir.path().join("Invoice_INV-1_20250101.xml").exists());
    }
}
