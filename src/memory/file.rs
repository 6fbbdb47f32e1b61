//! Plain-text file backend for the fact store.

use super::{FactStore, MEMORY_HEADER};
use crate::error::{LadleError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Fact store backed by an append-only UTF-8 text file.
pub struct FileFactStore {
    path: PathBuf,
}

impl FileFactStore {
    /// Open the memory file, creating it with a header if missing.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await? {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, format!("{}\n", MEMORY_HEADER))
                .await
                .map_err(|e| {
                    LadleError::Memory(format!("Failed to create {}: {}", path.display(), e))
                })?;
            debug!("Created memory file at {}", path.display());
        }

        Ok(Self { path })
    }
}

#[async_trait]
impl FactStore for FileFactStore {
    async fn load(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LadleError::Memory(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }

    async fn append(&self, fact: &str) -> Result<()> {
        // The file may have been removed since open
        let entry = if tokio::fs::try_exists(&self.path).await? {
            format!("{}\n", fact)
        } else {
            debug!("Recreating memory file at {}", self.path.display());
            format!("{}\n{}\n", MEMORY_HEADER, fact)
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                LadleError::Memory(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_file_with_header() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("nested").join("memory.txt");

        let store = FileFactStore::open(&path).await?;
        assert_eq!(store.load().await?, "--- Research Memory ---\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_append_survives_reopen() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("memory.txt");

        let store = FileFactStore::open(&path).await?;
        store.append("The Rust 2024 edition shipped with Rust 1.85").await?;

        let reopened = FileFactStore::open(&path).await?;
        reopened.append("Ferris is the Rust mascot").await?;

        let log = reopened.load().await?;
        assert_eq!(
            log,
            "--- Research Memory ---\n\
            The Rust 2024 edition shipped with Rust 1.85\n\
            Ferris is the Rust mascot\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_append_after_delete_restores_header() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("memory.txt");

        let store = FileFactStore::open(&path).await?;
        std::fs::remove_file(&path)?;
        store.append("Rust 1.0 was released in May 2015").await?;

        assert_eq!(
            store.load().await?,
            "--- Research Memory ---\nRust 1.0 was released in May 2015\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_existing_file_is_left_untouched() -> anyhow::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("memory.txt");
        std::fs::write(&path, "hand written notes\n")?;

        let store = FileFactStore::open(&path).await?;
        assert_eq!(store.load().await?, "hand written notes\n");
        Ok(())
    }
}
