use crate::domain::error::StoreError;
use crate::domain::model::Store;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};

/// Parse a bookmarks document. Empty (or whitespace-only) input is a fresh store.
pub fn load_store(bytes: &[u8]) -> Result<Store, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Store::default());
    }
    serde_json::from_slice(bytes).map_err(StoreError::Parse)
}

pub fn render_store(store: &Store) -> Result<String, StoreError> {
    serde_json::to_string_pretty(store).map_err(StoreError::Encode)
}

/// The backing document, opened once and held for the life of the process.
///
/// Only one handle should exist per document: every persist rewrites the whole
/// file, so two processes writing the same path can interleave and corrupt it.
#[derive(Debug)]
pub struct StoreFile {
    path: PathBuf,
    file: File,
}

impl StoreFile {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .await
            .map_err(|e| StoreError::io(format!("opening {}", path.display()), e))?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_all(&mut self) -> Result<Vec<u8>, StoreError> {
        let context = || format!("reading {}", self.path.display());
        self.file
            .seek(SeekFrom::Start(0))
            .await
            .map_err(|e| StoreError::io(context(), e))?;
        let mut raw = Vec::new();
        self.file
            .read_to_end(&mut raw)
            .await
            .map_err(|e| StoreError::io(context(), e))?;
        Ok(raw)
    }

    pub async fn load(&mut self) -> Result<Store, StoreError> {
        let raw = self.read_all().await?;
        load_store(&raw)
    }

    /// Truncate the document and write the whole store back. Returns the byte count.
    pub async fn persist(&mut self, store: &Store) -> Result<usize, StoreError> {
        let pretty = render_store(store)?;
        match self.rewrite(pretty.as_bytes()).await {
            Ok(()) => Ok(pretty.len()),
            Err(source) => Err(StoreError::Write {
                path: self.path.display().to_string(),
                source,
                dump: None,
            }),
        }
    }

    async fn rewrite(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.set_len(0).await?;
        self.file.seek(SeekFrom::Start(0)).await?;
        self.file.write_all(bytes).await?;
        self.file.flush().await?;
        self.file.sync_all().await
    }
}
