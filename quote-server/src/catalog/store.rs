//! Shared, swappable catalog snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use super::error::CatalogError;
use super::rates::{CatalogSummary, RateCatalog};

/// A catalog together with the time it was installed.
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub catalog: RateCatalog,
    pub loaded_at: DateTime<Utc>,
}

/// Thread-safe holder of the current rate catalog.
///
/// Readers take an `Arc` to the current snapshot and resolve against it
/// without holding the lock; a replacement never disturbs queries already
/// running on the previous snapshot.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    inner: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    /// Create a store holding `catalog`.
    pub fn new(catalog: RateCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(CatalogSnapshot {
                catalog,
                loaded_at: Utc::now(),
            }))),
        }
    }

    /// Create a store with no rates loaded.
    pub fn empty() -> Self {
        Self::new(RateCatalog::default())
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Replace the whole catalog.
    ///
    /// On validation failure the existing catalog is kept and the error is
    /// returned.
    pub async fn replace(&self, catalog: RateCatalog) -> Result<CatalogSummary, CatalogError> {
        catalog.validate()?;
        let summary = catalog.summary();

        let snapshot = Arc::new(CatalogSnapshot {
            catalog,
            loaded_at: Utc::now(),
        });
        let mut guard = self.inner.write().await;
        *guard = snapshot;

        info!(
            sea_coc = summary.sea_coc,
            sea_soc = summary.sea_soc,
            rail = summary.rail,
            "Rate catalog replaced"
        );
        Ok(summary)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::empty()
    }
}
