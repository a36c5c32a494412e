//! Application state for the web layer.

use std::sync::Arc;

use crate::advisory::{Advisor, CachedAdvisor};
use crate::catalog::CatalogStore;
use crate::quote::{QuoteConfig, QuoteService};

/// The advisor used by the server: the configured provider behind a cache.
pub type AppAdvisor = CachedAdvisor<Advisor>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Swappable rate catalog
    pub catalog: CatalogStore,

    /// Quoting over the catalog
    pub quotes: Arc<QuoteService<AppAdvisor>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: CatalogStore, advisor: AppAdvisor, config: QuoteConfig) -> Self {
        let quotes = QuoteService::new(catalog.clone(), advisor, config);
        Self {
            catalog,
            quotes: Arc::new(quotes),
        }
    }
}
