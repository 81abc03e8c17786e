use crate::domain::error::StoreError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_DIR: &str = ".config";
pub const APP_DIR: &str = "bookmark-manager";
pub const STORE_FILE: &str = "main.json";

/// `~/.config/bookmark-manager/main.json`, or `None` when there is no home directory.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(APP_DIR).join(STORE_FILE))
}

/// Make sure the store file and its parent directories exist.
/// Returns `true` when an empty file had to be created.
pub async fn ensure_store_file(path: &Path) -> Result<bool, StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(format!("creating directory {}", parent.display()), e))?;
    }

    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(_) => {
            tracing::info!(path = %path.display(), "created empty bookmarks file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(StoreError::io(format!("creating {}", path.display()), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_path_ends_with_app_file() {
        if let Some(path) = default_store_path() {
            assert!(path.ends_with(".config/bookmark-manager/main.json"));
        }
    }

    #[tokio::test]
    async fn ensure_store_file_creates_once() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("main.json");

        assert!(ensure_store_file(&path).await.expect("first"));
        assert!(path.exists());

        tokio::fs::write(&path, "[]").await.expect("seed");
        assert!(!ensure_store_file(&path).await.expect("second"));
        assert_eq!(tokio::fs::read_to_string(&path).await.expect("read"), "[]");
    }
}
