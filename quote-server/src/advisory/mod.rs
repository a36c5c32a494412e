//! Advisory commentary for routes with no tabulated price.
//!
//! When no leg of a route can be priced, the quote carries an advisory
//! request instead. An [`AdvisoryProvider`] turns that request into free text
//! for the user: either the pricing desk's HTTP service or a canned reply.

mod cache;
mod client;
mod error;

use serde::{Deserialize, Serialize};

use crate::domain::ContainerType;

pub use cache::{CacheConfig, CachedAdvisor};
pub use client::{AdvisoryClient, AdvisoryConfig};
pub use error::AdvisoryError;

/// What the advisory service is asked about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub origin: String,
    pub destination: String,
    /// Absent for through-rail lookups.
    pub container_type: Option<ContainerType>,
    pub final_rail_city: Option<String>,
}

/// Source of free-text advice for unpriced routes.
pub trait AdvisoryProvider: Send + Sync {
    fn advise(
        &self,
        request: &AdvisoryRequest,
    ) -> impl Future<Output = Result<String, AdvisoryError>> + Send;
}

/// Canned reply used when no advisory service is configured.
#[derive(Debug, Clone, Default)]
pub struct StaticAdvisor;

impl StaticAdvisor {
    pub fn reply(request: &AdvisoryRequest) -> String {
        let route = match &request.final_rail_city {
            Some(city) => format!(
                "{} to {} via {}",
                request.origin, city, request.destination
            ),
            None => format!("{} to {}", request.origin, request.destination),
        };
        let container = request
            .container_type
            .map(|ct| format!("{ct} "))
            .unwrap_or_default();
        format!(
            "There is no tabulated {container}rate for {route}. Please ask the pricing desk for an individual quote."
        )
    }
}

impl AdvisoryProvider for StaticAdvisor {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        Ok(Self::reply(request))
    }
}

/// The advisor chosen at startup.
#[derive(Debug, Clone)]
pub enum Advisor {
    Http(AdvisoryClient),
    Static(StaticAdvisor),
}

impl AdvisoryProvider for Advisor {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        match self {
            Advisor::Http(client) => client.advise(request).await,
            Advisor::Static(advisor) => advisor.advise(request).await,
        }
    }
}
