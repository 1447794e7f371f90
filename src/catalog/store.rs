//! Reloadable catalog storage.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use tracing::{info, warn};

use super::Catalog;
use crate::config::Config;
use crate::error::Error;
use crate::Result;

/// Holds the active catalog and swaps it on reload.
///
/// Readers take an `Arc<Catalog>` under a short read lock and keep it for
/// as long as they need a consistent view. Reloads are serialized by a
/// separate mutex and build the new catalog before taking the write lock.
#[derive(Debug)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
    source: Option<PathBuf>,
    reload_lock: Mutex<()>,
}

impl CatalogStore {
    /// Create a store with a fixed catalog and no backing file.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
            reload_lock: Mutex::new(()),
        }
    }

    /// Create a store from a catalog that was loaded from `path`.
    ///
    /// Later calls to [`reload`](Self::reload) re-read the same file.
    pub fn with_source(catalog: Catalog, path: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(path.into()),
            ..Self::new(catalog)
        }
    }

    /// Load a catalog from a configuration file.
    pub fn open(path: &Path) -> Result<Self> {
        let config = Config::from_file(path)?;
        let catalog = Catalog::from_config(&config)?;
        Ok(Self::with_source(catalog, path))
    }

    /// Get the active catalog.
    pub fn current(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Path the catalog is reloaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Install a new catalog.
    pub fn replace(&self, catalog: Catalog) -> Result<()> {
        let _serial = self.reload_lock.lock().map_err(|_| Error::LockPoisoned)?;
        self.swap(catalog)
    }

    /// Re-read the backing file and install the result.
    ///
    /// On any failure the previously active catalog stays in place.
    pub fn reload(&self) -> Result<()> {
        let _serial = self.reload_lock.lock().map_err(|_| Error::LockPoisoned)?;

        let path = self.source.as_deref().ok_or(Error::NoConfigSource)?;
        let catalog = Config::from_file(path)
            .map_err(Error::from)
            .and_then(|config| Catalog::from_config(&config).map_err(Error::from))
            .map_err(|e| {
                warn!(path = %path.display(), error = %e, "configuration reload failed");
                e
            })?;

        self.swap(catalog)?;
        info!(path = %path.display(), "configuration reloaded");
        Ok(())
    }

    fn swap(&self, catalog: Catalog) -> Result<()> {
        let mut current = self.current.write().map_err(|_| Error::LockPoisoned)?;
        *current = Arc::new(catalog);
        Ok(())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}
