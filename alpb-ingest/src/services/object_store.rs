//! Object storage
//!
//! Tracking exports live in a bucket under `YYYY/MM/DD/CSV/<file>`.
//! [`LocalBucket`] maps a bucket onto a directory.

use alpb_common::{Error, Result};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Object body, or `None` when no object has this key
    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Bucket stored as a directory tree
#[derive(Debug, Clone)]
pub struct LocalBucket {
    root: PathBuf,
}

impl LocalBucket {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bucket `name` under a storage root holding one directory per bucket
    pub fn in_storage_root(storage_root: &Path, name: &str) -> Self {
        Self::new(storage_root.join(name))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || key.is_empty() {
            return Err(Error::InvalidInput(format!("Invalid object key '{}'", key)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalBucket {
    async fn get_object(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.object_path(key)?;

        match tokio::fs::read(&path).await {
            Ok(body) => {
                tracing::debug!(key = %key, bytes = body.len(), "Read object");
                Ok(Some(body))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
