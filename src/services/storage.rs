use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// URL prefix under which the upload directory is served.
pub const STATIC_FILES_URL: &str = "/static/files";

/// Flat, name-addressed file store backing the upload directory.
///
/// Names are bare filenames; anything that could escape the directory is rejected.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn save_file(&self, name: &str, data: Vec<u8>) -> Result<()>;
    /// Removes `name`. Returns `Ok(false)` when there was nothing to remove.
    async fn delete_file(&self, name: &str) -> Result<bool>;
    async fn file_exists(&self, name: &str) -> Result<bool>;
    fn base_path(&self) -> &Path;
}

pub struct LocalStorageService {
    base_path: PathBuf,
}

impl LocalStorageService {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !is_bare_filename(name) {
            return Err(anyhow!("Refusing non-bare filename: {:?}", name));
        }
        Ok(self.base_path.join(name))
    }
}

pub fn is_bare_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn save_file(&self, name: &str, data: Vec<u8>) -> Result<()> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, data).await?;
        Ok(())
    }

    async fn delete_file(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn file_exists(&self, name: &str) -> Result<bool> {
        let path = self.resolve(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }
}
