use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::Result;
use crate::naming::cache_file_name;

/// Subfolder of the platform cache directory owned by this service.
pub const CACHE_DIR_NAME: &str = "mcp-4d-docs";

/// Trait for a documentation cache keyed by command name.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the cached fragment, or `None` on a miss.
    async fn get(&self, command_name: &str) -> Result<Option<String>>;
    /// Stores a fragment, replacing any previous entry for the same name.
    async fn insert(&self, command_name: &str, content: &str) -> Result<()>;
    /// Removes every cached fragment and returns how many were removed.
    async fn clear(&self) -> Result<usize>;
}

/// Cache storing one `<md5>.html` file per command name in a directory.
///
/// The platform directory is resolved on every operation rather than at
/// construction, so an unusable cache location only fails the operations
/// that read or write entries.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: Option<PathBuf>,
}

impl DiskCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir: Some(cache_dir),
        }
    }

    /// Cache in `<platform cache base>/mcp-4d-docs`.
    pub fn platform_default() -> Self {
        Self { cache_dir: None }
    }

    /// Directory holding the entries. Does not touch the filesystem.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(cache_base_dir()?.join(CACHE_DIR_NAME)),
        }
    }

    /// Path of the entry for `command_name`. Does not touch the filesystem.
    pub fn entry_path(&self, command_name: &str) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(cache_file_name(command_name)))
    }

    async fn ensure_dir(&self) -> Result<PathBuf> {
        let dir = self.cache_dir()?;
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }
}

#[async_trait]
impl Cache for DiskCache {
    async fn get(&self, command_name: &str) -> Result<Option<String>> {
        let path = self.ensure_dir().await?.join(cache_file_name(command_name));
        match fs::read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!("Read cache entry {:?}", path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, command_name: &str, content: &str) -> Result<()> {
        let path = self.ensure_dir().await?.join(cache_file_name(command_name));
        fs::write(&path, content).await?;
        tracing::debug!("Wrote cache entry {:?} ({} bytes)", path, content.len());
        Ok(())
    }

    /// Deletes the `.html` entries only; anything else in the directory stays.
    async fn clear(&self) -> Result<usize> {
        let cache_dir = self.cache_dir()?;
        if !fs::try_exists(&cache_dir).await? {
            tracing::info!("Cache directory {:?} not found, nothing to clear.", cache_dir);
            return Ok(0);
        }

        let mut removed = 0;
        let mut entries = fs::read_dir(&cache_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let is_entry = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(".html"));
            if !is_entry || !entry.file_type().await?.is_file() {
                continue;
            }
            fs::remove_file(entry.path()).await?;
            tracing::debug!("Removed cache entry {:?}", entry.path());
            removed += 1;
        }

        tracing::info!("Cleared {} cache entries from {:?}", removed, cache_dir);
        Ok(removed)
    }
}

/// Platform cache base directory for the running OS.
pub fn cache_base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory")
    })?;
    Ok(cache_base_for(
        std::env::consts::OS,
        &home,
        std::env::var_os("LOCALAPPDATA"),
    ))
}

fn cache_base_for(os: &str, home: &Path, local_app_data: Option<OsString>) -> PathBuf {
    match os {
        "macos" => home.join("Library").join("Caches"),
        "windows" => local_app_data
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join("AppData").join("Local")),
        _ => home.join(".cache"),
    }
}
