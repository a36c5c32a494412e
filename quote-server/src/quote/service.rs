//! Async quoting over the live catalog.

use tracing::{debug, warn};

use crate::advisory::AdvisoryProvider;
use crate::best_price::{BestPriceCandidate, best_price};
use crate::catalog::CatalogStore;
use crate::domain::DomainError;

use super::composer::resolve;
use super::config::QuoteConfig;
use super::model::Quote;
use super::query::{QuoteRequest, RouteQuery};

/// Quotes requests against the current catalog snapshot and asks the
/// advisor about routes nothing could be priced for.
pub struct QuoteService<A> {
    catalog: CatalogStore,
    advisor: A,
    config: QuoteConfig,
}

impl<A: AdvisoryProvider> QuoteService<A> {
    pub fn new(catalog: CatalogStore, advisor: A, config: QuoteConfig) -> Self {
        Self {
            catalog,
            advisor,
            config,
        }
    }

    pub fn advisor(&self) -> &A {
        &self.advisor
    }

    /// Quote one request.
    ///
    /// A diagnostic-only quote is handed to the advisor; if the advisor
    /// fails, the quote keeps its own commentary and no advice.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Quote, DomainError> {
        let snapshot = self.catalog.snapshot().await;
        let mut quote = resolve(request, &snapshot.catalog, &self.config)?;

        if let Quote::DiagnosticOnly(diagnostic) = &mut quote {
            match self.advisor.advise(&diagnostic.advisory).await {
                Ok(advice) => diagnostic.advice = Some(advice),
                Err(e) => warn!(
                    origin = %diagnostic.advisory.origin,
                    destination = %diagnostic.advisory.destination,
                    error = %e,
                    "Advisory request failed"
                ),
            }
        }

        Ok(quote)
    }

    /// Run a best-price search. Never consults the advisor.
    pub async fn best_price(&self, query: &RouteQuery) -> Result<Vec<BestPriceCandidate>, DomainError> {
        let snapshot = self.catalog.snapshot().await;
        let candidates = best_price(query, &snapshot.catalog, &self.config)?;
        debug!(candidates = candidates.len(), origin = %query.origin, "Best-price search served");
        Ok(candidates)
    }
}
