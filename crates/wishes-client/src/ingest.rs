//! File-drop ingestion: turn `*.txt` files from a scan directory into
//! submissions.
//!
//! File format: first line is the name, second line the wish; both trimmed,
//! anything after the second line is ignored. A submitted file moves to the
//! processed directory, a file that fails for any reason (including that
//! move) to the error directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};
use wishes_core::{NewWish, WishRecord};

use crate::client::{ClientError, WishesClient};

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub scan_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub error_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from("./scanned-wishes"),
            processed_dir: PathBuf::from("./processed"),
            error_dir: PathBuf::from("./error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("insufficient data in file (need a name line and a wish line)")]
    InsufficientData,
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Submit(#[from] ClientError),
    #[error("moving file to {path}: {source}")]
    Move {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of one pass over the scan directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Extract the submission from a file's contents.
pub fn parse_wish_file(contents: &str) -> Result<NewWish, IngestError> {
    let mut lines = contents.lines();
    match (lines.next(), lines.next()) {
        (Some(name), Some(wish)) => Ok(NewWish::new(name.trim(), wish.trim())),
        _ => Err(IngestError::InsufficientData),
    }
}

/// Process every `*.txt` file currently in the scan directory.
///
/// A failing file never stops the pass. Errors are only returned when the
/// directories themselves cannot be prepared or listed.
pub async fn run_once(client: &WishesClient, cfg: &IngestConfig) -> anyhow::Result<IngestSummary> {
    for dir in [&cfg.scan_dir, &cfg.processed_dir, &cfg.error_dir] {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut summary = IngestSummary::default();
    for path in pending_files(&cfg.scan_dir).await? {
        let name = file_name(&path);
        info!(file = %name, "processing file");

        let outcome = match submit_file(client, &path).await {
            Ok(record) => {
                info!(file = %name, id = %record.id, "wish sent");
                move_into(&path, &cfg.processed_dir).await
            }
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                warn!(file = %name, error = %e, "failed to process file");
                if let Err(e) = move_into(&path, &cfg.error_dir).await {
                    warn!(file = %name, error = %e, "file left in scan directory");
                }
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Poll the scan directory forever.
pub async fn watch(client: &WishesClient, cfg: &IngestConfig, every: Duration) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        if let Err(e) = run_once(client, cfg).await {
            warn!(error = %e, dir = %cfg.scan_dir.display(), "ingest pass failed");
        }
    }
}

async fn submit_file(client: &WishesClient, path: &Path) -> Result<WishRecord, IngestError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let req = parse_wish_file(&contents)?;
    Ok(client.submit(&req).await?)
}

async fn pending_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_txt = path.extension().is_some_and(|ext| ext == "txt");
        if is_txt && entry.file_type().await?.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Move `path` into `dir`, replacing a file of the same name.
async fn move_into(path: &Path, dir: &Path) -> Result<(), IngestError> {
    let target = dir.join(file_name(path));
    tokio::fs::rename(path, &target)
        .await
        .map_err(|source| IngestError::Move { path: target, source })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_wish() {
        let req = parse_wish_file("  Alice \r\nA bicycle  \nsigned, A.\n").unwrap();
        assert_eq!(req, NewWish::new("Alice", "A bicycle"));
    }

    #[test]
    fn single_line_is_insufficient() {
        assert!(matches!(
            parse_wish_file("Alice\n"),
            Err(IngestError::InsufficientData)
        ));
        assert!(matches!(parse_wish_file(""), Err(IngestError::InsufficientData)));
    }

    #[test]
    fn blank_wish_line_parses_to_empty() {
        // The service rejects it; parsing alone does not.
        let req = parse_wish_file("Alice\n   \n").unwrap();
        assert_eq!(req.wish.as_deref(), Some(""));
    }
}
