use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::debug;

use super::kv_store::{KeyValueStore, StoreError};

/// Root directory for the metadata cache.
///
/// This is a dedicated directory that `cacache` will manage internally
/// (index + content-addressed blobs).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheRoot(PathBuf);

impl CacheRoot {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Debug for CacheRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheRoot").field(&self.0).finish()
    }
}

/// A thin typed wrapper over `cacache` holding serialized cache entries.
#[derive(Clone, Debug)]
pub struct DiskKeyValueStore {
    root: CacheRoot,
}

impl DiskKeyValueStore {
    pub fn new(root: CacheRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CacheRoot {
        &self.root
    }
}

fn map_cacache_error(op: &str, key: &str, err: cacache::Error) -> StoreError {
    match err {
        cacache::Error::IntegrityError(err) => StoreError::Integrity(format!(
            "{op} {key}: ({err})"
        )),
        cacache::Error::SizeMismatch(wanted, actual) => {
            StoreError::Integrity(format!(
                "{op} {key}: size mismatch, wanted={wanted}, actual={actual}"
            ))
        }
        cacache::Error::IoError(_, msg) => {
            StoreError::Io(format!("{op} {key}: {msg}"))
        }
        other => StoreError::Backend(format!("{op} {key}: {other}")),
    }
}

#[async_trait]
impl KeyValueStore for DiskKeyValueStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        match cacache::read(self.root.as_path(), key).await {
            Ok(bytes) => Ok(Some(String::from_utf8(bytes)?)),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(err) => Err(map_cacache_error("read", key, err)),
        }
    }

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        cacache::write(self.root.as_path(), key, value.as_bytes())
            .await
            .map(|integrity| {
                debug!(%key, %integrity, "cache entry written");
            })
            .map_err(|err| map_cacache_error("write", key, err))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let r_opts = cacache::index::RemoveOpts::new().remove_fully(true);
        r_opts
            .remove(self.root.as_path(), key)
            .await
            .map_err(|err| map_cacache_error("remove", key, err))
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let root = self.root.as_path().to_path_buf();
        if !root.exists() {
            return Ok(Vec::new());
        }

        tokio::task::spawn_blocking(move || {
            cacache::list_sync(&root)
                .map(|entry| {
                    entry
                        .map(|meta| meta.key)
                        .map_err(|err| map_cacache_error("list", "*", err))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(|err| StoreError::Join(err.to_string()))?
    }
}
