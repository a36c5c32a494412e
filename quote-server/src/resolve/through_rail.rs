//! Through-rail offer lookup.

use crate::catalog::{RateCatalog, ThroughRailOffer};
use crate::quote::ThroughRailQuery;

use super::commentary::{FailureCause, LegFailure, LegKind};

/// Find the offer matching all five keys, ignoring case and surrounding
/// whitespace. There is no partial or fuzzy fallback.
pub fn resolve_through_rail<'c>(
    catalog: &'c RateCatalog,
    query: &ThroughRailQuery,
) -> Result<&'c ThroughRailOffer, LegFailure> {
    catalog
        .through_rail_offers
        .iter()
        .find(|offer| {
            same_key(&offer.agent, &query.agent)
                && same_key(&offer.departure_city, &query.departure_city)
                && same_key(&offer.destination_city, &query.destination_city)
                && same_key(&offer.incoterms, &query.incoterms)
                && same_key(&offer.border, &query.border)
        })
        .ok_or_else(|| {
            LegFailure::new(
                LegKind::ThroughRail,
                FailureCause::NoRoute,
                format!(
                    "No through-rail offer from {} to {} via {} ({}, {}).",
                    query.departure_city,
                    query.destination_city,
                    query.border,
                    query.agent,
                    query.incoterms
                ),
            )
        })
}

fn same_key(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
