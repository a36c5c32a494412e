//! Data transfer objects for web responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::best_price::BestPriceCandidate;
use crate::catalog::CatalogSummary;

/// Current catalog state.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Row counts per table
    pub summary: CatalogSummary,

    /// When the catalog was installed
    pub loaded_at: DateTime<Utc>,
}

/// Ranked best-price search results.
#[derive(Debug, Serialize)]
pub struct BestPriceResponse {
    /// Number of candidates returned
    pub count: usize,

    /// Candidates, cheapest first; empty when no route is feasible
    pub candidates: Vec<BestPriceCandidate>,
}

impl From<Vec<BestPriceCandidate>> for BestPriceResponse {
    fn from(candidates: Vec<BestPriceCandidate>) -> Self {
        Self {
            count: candidates.len(),
            candidates,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
