//! Best-price search.
//!
//! Enumerates every destination, carrier and rail routing a query allows,
//! prices each, and keeps the cheapest few.

mod generator;
mod rank;

pub use generator::{BestPriceCandidate, generate_candidates};
pub use rank::rank_candidates;

use crate::catalog::RateCatalog;
use crate::domain::DomainError;
use crate::quote::{QuoteConfig, RouteQuery};

/// Find the cheapest feasible options for `query`, best first.
///
/// An empty result means no feasible route.
pub fn best_price(
    query: &RouteQuery,
    catalog: &RateCatalog,
    config: &QuoteConfig,
) -> Result<Vec<BestPriceCandidate>, DomainError> {
    query.validate()?;
    let candidates = generate_candidates(query, catalog, config);
    Ok(rank_candidates(candidates, config.max_candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerType, Ownership};
    use crate::quote::fixtures::{catalog, sea};

    #[test]
    fn returns_cheapest_first() {
        let query = RouteQuery::new(Ownership::Coc, "Shanghai", ContainerType::Dc20);
        let ranked = best_price(&query, &catalog(), &QuoteConfig::default()).unwrap();

        let costs: Vec<f64> = ranked.iter().map(|c| c.total_comparison_cost).collect();
        assert_eq!(costs, vec![600.0, 1500.0, 1600.0, 1650.0]);
    }

    #[test]
    fn at_most_max_candidates() {
        let mut catalog = catalog();
        for i in 0..10 {
            let carrier = format!("Carrier {i}");
            catalog.sea_rates.push(sea(
                Ownership::Coc,
                &["Shanghai"],
                &["Busan"],
                &[carrier.as_str()],
                &[(ContainerType::Dc20, Some(100.0 + f64::from(i)))],
                None,
            ));
        }
        let query = RouteQuery::new(Ownership::Coc, "Shanghai", ContainerType::Dc20);

        let ranked = best_price(&query, &catalog, &QuoteConfig::default()).unwrap();
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].carrier.as_deref(), Some("Carrier 0"));

        let ranked = best_price(&query, &catalog, &QuoteConfig::new(95.0, 2)).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn rejects_blank_origin() {
        let query = RouteQuery::new(Ownership::Coc, "", ContainerType::Dc20);
        assert!(best_price(&query, &catalog(), &QuoteConfig::default()).is_err());
    }
}
