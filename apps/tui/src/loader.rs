//! Fetches the trends snapshot from disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use trendboard_core::{TrendsError, TrendsSnapshot};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] TrendsError),
}

/// Reads the snapshot fresh on every call; nothing is cached between loads.
pub async fn load_snapshot(path: &Path) -> Result<TrendsSnapshot, LoadError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let snapshot = TrendsSnapshot::from_json(&body)?;
    tracing::debug!(
        path = %path.display(),
        keywords = snapshot.keyword_frequencies.len(),
        velocity = snapshot.keyword_velocity.len(),
        "loaded trends snapshot"
    );
    Ok(snapshot)
}
