//! Ocean leg lookup.

use tracing::trace;

use crate::catalog::{RateCatalog, SeaRouteRate};
use crate::domain::{ContainerType, Money, Ownership};
use crate::matching::{normalize, same_place};

use super::commentary::{FailureCause, LegFailure, LegKind};

/// Keys for one sea leg lookup.
#[derive(Debug, Clone, Copy)]
pub struct SeaLegRequest<'a> {
    pub ownership: Ownership,
    pub origin: &'a str,
    pub destination: &'a str,
    pub carrier: Option<&'a str>,
    pub container: ContainerType,
}

/// Outcome of a sea leg lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaLegResolution {
    /// Tabulated price, before margin.
    pub price: Option<Money>,
    /// Comment of the matched record (the first match, if none was priced).
    pub comment: Option<String>,
    /// Carriers of the matched record, or just the requested carrier.
    pub carriers: Vec<String>,
    pub failure: Option<LegFailure>,
}

impl SeaLegResolution {
    /// The carrier the quote is attributed to: the requested one, else the
    /// first listed on the matched record.
    pub fn carrier(&self) -> Option<&str> {
        self.carriers.first().map(String::as_str)
    }
}

/// Look up the sea leg.
///
/// Returns the first record in table order that matches structurally and has
/// a price for the container type. When matches exist but none is priced,
/// the first match's comment is kept for diagnostics.
pub fn resolve_sea_leg(catalog: &RateCatalog, request: &SeaLegRequest<'_>) -> SeaLegResolution {
    let mut first_match: Option<&SeaRouteRate> = None;

    for rate in catalog
        .sea_rates(request.ownership)
        .filter(|rate| matches_route(rate, request))
    {
        first_match.get_or_insert(rate);
        if let Some(price) = rate.price_for(request.container) {
            trace!(
                origin = request.origin,
                destination = request.destination,
                %price,
                "Sea leg priced"
            );
            return SeaLegResolution {
                price: Some(price),
                comment: rate.comment.clone(),
                carriers: attributed_carriers(rate, request.carrier),
                failure: None,
            };
        }
    }

    match first_match {
        Some(rate) => SeaLegResolution {
            price: None,
            comment: rate.comment.clone(),
            carriers: attributed_carriers(rate, request.carrier),
            failure: Some(LegFailure::new(
                LegKind::Sea,
                FailureCause::Unpriced,
                format!(
                    "A sea rate from {} to {} exists but has no {} price.",
                    request.origin, request.destination, request.container
                ),
            )),
        },
        None => SeaLegResolution {
            price: None,
            comment: None,
            carriers: request.carrier.map(|c| vec![c.to_string()]).unwrap_or_default(),
            failure: Some(LegFailure::new(
                LegKind::Sea,
                FailureCause::NoRoute,
                no_route_message(request),
            )),
        },
    }
}

fn no_route_message(request: &SeaLegRequest<'_>) -> String {
    match request.carrier {
        Some(carrier) => format!(
            "No {} sea route from {} to {} with {}.",
            request.ownership, request.origin, request.destination, carrier
        ),
        None => format!(
            "No {} sea route from {} to {}.",
            request.ownership, request.origin, request.destination
        ),
    }
}

fn matches_route(rate: &SeaRouteRate, request: &SeaLegRequest<'_>) -> bool {
    contains_place(&rate.origin_ports, request.origin)
        && contains_place(&rate.destination_ports, request.destination)
        && request
            .carrier
            .is_none_or(|carrier| rate.carriers.iter().any(|c| same_carrier(c, carrier)))
}

fn attributed_carriers(rate: &SeaRouteRate, requested: Option<&str>) -> Vec<String> {
    match requested {
        Some(carrier) => vec![carrier.to_string()],
        None => rate.carriers.clone(),
    }
}

/// Whether `list` names `place` under any spelling.
pub(crate) fn contains_place(list: &[String], place: &str) -> bool {
    list.iter().any(|p| same_place(p, place))
}

/// Carrier names compare case-insensitively, ignoring surrounding space.
pub(crate) fn same_carrier(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Distinct sea destinations reachable from `origin`, in table order.
pub fn sea_destinations(catalog: &RateCatalog, ownership: Ownership, origin: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut destinations = Vec::new();

    for rate in catalog
        .sea_rates(ownership)
        .filter(|rate| contains_place(&rate.origin_ports, origin))
    {
        for port in &rate.destination_ports {
            let key = normalize(port).key().to_string();
            if !seen.contains(&key) {
                seen.push(key);
                destinations.push(port.clone());
            }
        }
    }

    destinations
}

/// Distinct carriers offering `origin` → `destination`, in table order.
pub fn sea_carriers(
    catalog: &RateCatalog,
    ownership: Ownership,
    origin: &str,
    destination: &str,
) -> Vec<String> {
    let mut carriers: Vec<String> = Vec::new();

    for rate in catalog.sea_rates(ownership).filter(|rate| {
        contains_place(&rate.origin_ports, origin)
            && contains_place(&rate.destination_ports, destination)
    }) {
        for carrier in &rate.carriers {
            if !carriers.iter().any(|c| same_carrier(c, carrier)) {
                carriers.push(carrier.clone());
            }
        }
    }

    carriers
}
