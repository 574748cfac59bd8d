use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use tokio::{fs, io::AsyncWriteExt};
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError, storage::ports::ImageStore,
};

/// Stores processed images as plain files in one folder.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Opens the folder, creating it when missing.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            CoreError::StorageWriteError(format!(
                "Failed to create storage folder {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::info!(root = %root.display(), "Processed image folder ready");

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl ImageStore for LocalImageStore {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn write(&self, filename: &str, data: Bytes) -> Result<(), CoreError> {
        let path = self.path_for(filename);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                tracing::error!(path = %path.display(), error = %e, "Failed to create processed image");
                CoreError::StorageWriteError(e.to_string())
            })?;

        file.write_all(&data).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write processed image");
            CoreError::StorageWriteError(e.to_string())
        })?;

        file.flush()
            .await
            .map_err(|e| CoreError::StorageWriteError(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn read(&self, filename: &str) -> Result<Option<Bytes>, CoreError> {
        match fs::read(self.path_for(filename)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read processed image");
                Err(CoreError::StorageReadError(e.to_string()))
            }
        }
    }
}
