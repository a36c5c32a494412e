//! Best-price candidate enumeration.
//!
//! Every destination, carrier and rail routing consistent with the query is
//! composed into a full quote. Combinations that cannot be priced well
//! enough to compare are dropped.

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::RateCatalog;
use crate::domain::Ownership;
use crate::matching::{classify_hub, further_rail_required, normalize};
use crate::quote::{Composition, QuoteConfig, RailPlan, RouteQuery, SeaRailQuote, compose_route};
use crate::resolve::{RailLegRequest, RailRoute, resolve_rail_routes, sea_carriers, sea_destinations};

/// One fully composed option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPriceCandidate {
    pub destination: String,
    pub carrier: Option<String>,
    pub rail_route: Option<RailRoute>,
    pub quote: SeaRailQuote,
    /// Quote total in USD, used for ranking.
    pub total_comparison_cost: f64,
}

/// Enumerate and price every combination, in generation order.
pub fn generate_candidates(
    query: &RouteQuery,
    catalog: &RateCatalog,
    config: &QuoteConfig,
) -> Vec<BestPriceCandidate> {
    let mut candidates = Vec::new();

    for destination in destinations(query, catalog) {
        let carriers: Vec<String> = match query.carrier() {
            Some(carrier) => vec![carrier.to_string()],
            None => sea_carriers(catalog, query.ownership, &query.origin, &destination),
        };
        if carriers.is_empty() {
            trace!(destination = %destination, "No carriers");
            continue;
        }

        let rail_required = further_rail_required(query.final_rail_city(), &destination);
        let rail_plans: Vec<Option<RailRoute>> = match query.final_rail_city() {
            Some(city) if rail_required => {
                let routes = resolve_rail_routes(
                    catalog,
                    &RailLegRequest {
                        sea_port: &destination,
                        final_city: city,
                        arrival_station: query.rail_station(),
                        container: query.container_type,
                        weight_tier: query.weight_tier,
                    },
                );
                if routes.is_empty() {
                    trace!(destination = %destination, city, "No priced rail routing");
                    continue;
                }
                routes.into_iter().map(Some).collect()
            }
            _ => vec![None],
        };

        for carrier in &carriers {
            for rail_route in &rail_plans {
                let plan = match rail_route {
                    Some(route) => RailPlan::Routed(route.clone()),
                    None => RailPlan::Lookup,
                };
                let composition = compose_route(
                    query,
                    &destination,
                    Some(carrier.as_str()),
                    plan,
                    catalog,
                    config,
                );

                let Composition::Priced(quote) = composition else {
                    continue;
                };
                if !comparable(&quote) {
                    continue;
                }

                candidates.push(BestPriceCandidate {
                    destination: destination.clone(),
                    carrier: Some(carrier.clone()),
                    rail_route: rail_route.clone(),
                    total_comparison_cost: quote.total.amount,
                    quote,
                });
            }
        }
    }

    debug!(candidates = candidates.len(), origin = %query.origin, "Candidates generated");
    candidates
}

/// Whether a composed quote is complete enough to rank.
///
/// A sea record without a price is tolerated only when a priced rail leg
/// follows. A missing sea route, a failed rail leg or a failed drop-off fee
/// disqualifies.
fn comparable(quote: &SeaRailQuote) -> bool {
    if quote.sea_leg_unrouted() {
        return false;
    }
    if quote.sea_leg_failed() && quote.rail.is_none() {
        return false;
    }
    !quote.rail_leg_failed() && !quote.drop_off_failed()
}

/// Sea destinations to try, in table order.
fn destinations(query: &RouteQuery, catalog: &RateCatalog) -> Vec<String> {
    if let Some(destination) = query.destination() {
        return vec![destination.to_string()];
    }

    let all = sea_destinations(catalog, query.ownership, &query.origin);
    let Some(final_city) = query.final_rail_city() else {
        return all;
    };

    all.into_iter()
        .filter(|destination| {
            let is_final_city = serves_city(destination, final_city);
            match query.ownership {
                Ownership::Coc => is_final_city || classify_hub(destination).is_some(),
                Ownership::Soc => is_final_city,
            }
        })
        .collect()
}

/// Whether a port is in `city`, with or without its terminal qualifier.
fn serves_city(port: &str, city: &str) -> bool {
    let port = normalize(port);
    let city = normalize(city);
    port.key() == city.key() || port.base_key() == city.key()
}
