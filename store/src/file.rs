//! File-backed snapshot storage with replace-on-write semantics.

use std::path::PathBuf;

use async_trait::async_trait;
use riftwatch_shared::traits::{SnapshotIo, SnapshotIoError};
use tokio::fs;

/// Stores the roster snapshot as a single JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut raw = self.path.clone().into_os_string();
        raw.push(".tmp");
        PathBuf::from(raw)
    }
}

#[async_trait]
impl SnapshotIo for SnapshotFile {
    async fn read_all(&self) -> Result<Option<Vec<u8>>, SnapshotIoError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Write into a sibling temp file, then rename over the previous
    /// snapshot so a crash mid-write never leaves a torn document behind.
    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), SnapshotIoError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| Box::new(e) as SnapshotIoError)?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Box::new(e) as SnapshotIoError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("riftwatch-{}-{}.json", std::process::id(), name))
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent() {
        let file = SnapshotFile::new(scratch_path("missing"));
        assert!(file.read_all().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trips_and_replaces() {
        let path = scratch_path("roundtrip");
        let file = SnapshotFile::new(&path);

        file.write_all(b"{\"a\":1}".to_vec()).await.unwrap();
        assert_eq!(file.read_all().await.unwrap().unwrap(), b"{\"a\":1}");

        file.write_all(b"{}".to_vec()).await.unwrap();
        assert_eq!(file.read_all().await.unwrap().unwrap(), b"{}");

        let _ = fs::remove_file(&path).await;
    }
}
