//! Inland rail leg lookup.
//!
//! A rail leg continues from a sea hub to the requested final city. Rail
//! records are keyed by arrival city and list their departure stations under
//! every alias; the departure side is matched against the sea port with the
//! station compatibility rules.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::{RailLegRate, RateCatalog};
use crate::domain::{ContainerType, Money, WeightTier};
use crate::matching::{arrival_serves_city, is_compatible, same_place};

use super::commentary::{FailureCause, LegFailure, LegKind};

/// Keys for one rail leg lookup.
#[derive(Debug, Clone, Copy)]
pub struct RailLegRequest<'a> {
    /// Sea port the container is discharged at.
    pub sea_port: &'a str,
    pub final_city: &'a str,
    /// Only consider records arriving at this station.
    pub arrival_station: Option<&'a str>,
    pub container: ContainerType,
    /// 20' weight band; when absent the lighter band is preferred.
    pub weight_tier: Option<WeightTier>,
}

/// A fully priced rail routing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailRoute {
    pub departure_station: String,
    pub arrival_station: Option<String>,
    pub arrival_city: String,
    /// Weight band used for 20' pricing.
    pub weight_tier: Option<WeightTier>,
    pub tariff: Money,
    pub guard_fee: Money,
    /// Tariff plus guard fee, before margin.
    pub price: Money,
}

/// Outcome of a rail leg lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RailLegResolution {
    pub route: Option<RailRoute>,
    pub failure: Option<LegFailure>,
}

/// A tariff component missing from a rail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingComponent {
    Tariff20(Option<WeightTier>),
    GuardFee20,
    Tariff40,
    GuardFee40,
    MixedCurrency,
}

impl fmt::Display for MissingComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingComponent::Tariff20(Some(tier)) => write!(f, "20' tariff ({tier})"),
            MissingComponent::Tariff20(None) => f.write_str("20' tariff"),
            MissingComponent::GuardFee20 => f.write_str("20' guard fee"),
            MissingComponent::Tariff40 => f.write_str("40' tariff"),
            MissingComponent::GuardFee40 => f.write_str("40' guard fee"),
            MissingComponent::MixedCurrency => f.write_str("tariff and guard fee in one currency"),
        }
    }
}

/// How far a scan over rail records got.
enum Scan {
    /// No record arrives at the requested city (and station).
    NoRecords,
    /// Records exist but none departs from a station serving the port.
    NoCompatibleStation,
    /// Compatible records exist but each lacks something.
    Incomplete(Vec<String>),
}

/// Look up the rail leg: the first record, in table order, that both has a
/// departure station compatible with the port and is fully priced.
pub fn resolve_rail_leg(catalog: &RateCatalog, request: &RailLegRequest<'_>) -> RailLegResolution {
    let mut scan = Scan::NoRecords;

    for rate in candidates(catalog, request) {
        let Some(station) = compatible_station(rate, request.sea_port) else {
            if matches!(scan, Scan::NoRecords) {
                scan = Scan::NoCompatibleStation;
            }
            continue;
        };

        match price_leg(rate, request.container, request.weight_tier) {
            Ok(route) => {
                let route = route.complete(station, rate, request.arrival_station);
                trace!(
                    departure = %route.departure_station,
                    city = request.final_city,
                    price = %route.price,
                    "Rail leg priced"
                );
                return RailLegResolution {
                    route: Some(route),
                    failure: None,
                };
            }
            Err(missing) => {
                let detail = format!(
                    "{} is missing {}",
                    station,
                    missing
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                debug!(station = %station, city = request.final_city, %detail, "Rail record incomplete");
                if let Scan::Incomplete(details) = &mut scan {
                    if !details.contains(&detail) {
                        details.push(detail);
                    }
                } else {
                    scan = Scan::Incomplete(vec![detail]);
                }
            }
        }
    }

    RailLegResolution {
        route: None,
        failure: Some(failure_for(scan, request)),
    }
}

/// Every fully priced routing for the leg, one per matching record, in
/// table order.
pub fn resolve_rail_routes(catalog: &RateCatalog, request: &RailLegRequest<'_>) -> Vec<RailRoute> {
    candidates(catalog, request)
        .filter_map(|rate| {
            let station = compatible_station(rate, request.sea_port)?;
            price_leg(rate, request.container, request.weight_tier)
                .ok()
                .map(|route| route.complete(station, rate, request.arrival_station))
        })
        .collect()
}

fn failure_for(scan: Scan, request: &RailLegRequest<'_>) -> LegFailure {
    let port = request.sea_port;
    let city = request.final_city;
    match scan {
        Scan::NoRecords => {
            let message = match request.arrival_station {
                Some(station) => {
                    format!("No rail rate from {port} to {city} arriving at {station}.")
                }
                None => format!("No rail rate from {port} to {city}."),
            };
            LegFailure::new(LegKind::Rail, FailureCause::NoRoute, message)
        }
        Scan::NoCompatibleStation => LegFailure::new(
            LegKind::Rail,
            FailureCause::NoCompatibleStation,
            format!("No rail departure station serving {port} has a rate to {city}."),
        ),
        Scan::Incomplete(details) => LegFailure::new(
            LegKind::Rail,
            FailureCause::IncompletePricing,
            format!(
                "Rail from {port} to {city} is not fully priced for {}: {}.",
                request.container,
                details.join("; ")
            ),
        ),
    }
}

fn candidates<'c>(
    catalog: &'c RateCatalog,
    request: &RailLegRequest<'_>,
) -> impl Iterator<Item = &'c RailLegRate> {
    let final_city = request.final_city.to_string();
    let arrival_station = request.arrival_station.map(str::to_string);

    catalog.rail_rates.iter().filter(move |rate| {
        arrival_serves_city(&rate.arrival_city, &rate.arrival_stations, &final_city)
            && arrival_station.as_deref().is_none_or(|wanted| {
                rate.arrival_stations
                    .iter()
                    .any(|station| same_place(station, wanted))
            })
    })
}

fn compatible_station<'r>(rate: &'r RailLegRate, sea_port: &str) -> Option<&'r str> {
    rate.departure_stations
        .iter()
        .map(String::as_str)
        .find(|station| is_compatible(station, sea_port))
}

/// Pricing of a record before the stations are attached.
struct LegPrice {
    weight_tier: Option<WeightTier>,
    tariff: Money,
    guard_fee: Money,
    price: Money,
}

impl LegPrice {
    fn complete(
        self,
        departure_station: &str,
        rate: &RailLegRate,
        arrival_station: Option<&str>,
    ) -> RailRoute {
        let arrival_station = match arrival_station {
            Some(wanted) => rate
                .arrival_stations
                .iter()
                .find(|station| same_place(station, wanted))
                .cloned(),
            None => rate.arrival_stations.first().cloned(),
        };

        RailRoute {
            departure_station: departure_station.to_string(),
            arrival_station,
            arrival_city: rate.arrival_city.clone(),
            weight_tier: self.weight_tier,
            tariff: self.tariff,
            guard_fee: self.guard_fee,
            price: self.price,
        }
    }
}

/// Price a record for a container type, or list what is missing.
///
/// 20' needs a tariff for the weight band plus the 20' guard fee; without a
/// requested band the <24t tariff is preferred over <28t. 40' needs the 40'
/// tariff plus the 40' guard fee.
fn price_leg(
    rate: &RailLegRate,
    container: ContainerType,
    weight_tier: Option<WeightTier>,
) -> Result<LegPrice, Vec<MissingComponent>> {
    let (tariff, tier, guard_fee) = if container.is_twenty_foot() {
        let (tariff, tier) = match weight_tier {
            Some(WeightTier::Under24t) => (rate.price20_lt24t, Some(WeightTier::Under24t)),
            Some(WeightTier::Under28t) => (rate.price20_lt28t, Some(WeightTier::Under28t)),
            None => match (rate.price20_lt24t, rate.price20_lt28t) {
                (Some(p), _) => (Some(p), Some(WeightTier::Under24t)),
                (None, Some(p)) => (Some(p), Some(WeightTier::Under28t)),
                (None, None) => (None, None),
            },
        };
        (tariff, tier, rate.guard_fee20)
    } else {
        (rate.price40, None, rate.guard_fee40)
    };

    let mut missing = Vec::new();
    if tariff.is_none() {
        missing.push(if container.is_twenty_foot() {
            MissingComponent::Tariff20(weight_tier)
        } else {
            MissingComponent::Tariff40
        });
    }
    if guard_fee.is_none() {
        missing.push(if container.is_twenty_foot() {
            MissingComponent::GuardFee20
        } else {
            MissingComponent::GuardFee40
        });
    }

    let (Some(tariff), Some(guard_fee)) = (tariff, guard_fee) else {
        return Err(missing);
    };
    let price = tariff
        .checked_add(guard_fee)
        .ok_or_else(|| vec![MissingComponent::MixedCurrency])?;

    Ok(LegPrice {
        weight_tier: tier,
        tariff,
        guard_fee,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    fn rail(
        departures: &[&str],
        arrivals: &[&str],
        city: &str,
        lt24: Option<f64>,
        lt28: Option<f64>,
        guard20: Option<f64>,
        p40: Option<f64>,
        guard40: Option<f64>,
    ) -> RailLegRate {
        RailLegRate {
            departure_stations: departures.iter().map(|s| s.to_string()).collect(),
            arrival_stations: arrivals.iter().map(|s| s.to_string()).collect(),
            arrival_city: city.to_string(),
            price20_lt24t: lt24.map(Money::rub),
            price20_lt28t: lt28.map(Money::rub),
            guard_fee20: guard20.map(Money::rub),
            price40: p40.map(Money::rub),
            guard_fee40: guard40.map(Money::rub),
        }
    }

    fn catalog(rates: Vec<RailLegRate>) -> RateCatalog {
        RateCatalog {
            rail_rates: rates,
            ..RateCatalog::default()
        }
    }

    fn request<'a>(port: &'a str, container: ContainerType) -> RailLegRequest<'a> {
        RailLegRequest {
            sea_port: port,
            final_city: "Moscow",
            arrival_station: None,
            container,
            weight_tier: None,
        }
    }

    #[test]
    fn moscow_area_station_resolves_by_base_name() {
        let catalog = catalog(vec![rail(
            &["Vladivostok (eksp.)"],
            &["Vorsino"],
            "Moscow",
            Some(180_000.0),
            Some(195_000.0),
            Some(12_000.0),
            None,
            None,
        )]);

        let result = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Dc20));
        let route = result.route.unwrap();
        assert!(result.failure.is_none());
        assert_eq!(route.departure_station, "Vladivostok (eksp.)");
        assert_eq!(route.arrival_station.as_deref(), Some("Vorsino"));
        assert_eq!(route.weight_tier, Some(WeightTier::Under24t));
        assert_eq!(route.price, Money::rub(192_000.0));
    }

    #[test]
    fn explicit_weight_tier_is_honoured() {
        let catalog = catalog(vec![rail(
            &["Vladivostok"],
            &["Vorsino"],
            "Moscow",
            Some(180_000.0),
            Some(195_000.0),
            Some(12_000.0),
            None,
            None,
        )]);

        let req = RailLegRequest {
            weight_tier: Some(WeightTier::Under28t),
            ..request("Vladivostok", ContainerType::Dc20)
        };
        let route = resolve_rail_leg(&catalog, &req).route.unwrap();
        assert_eq!(route.tariff, Money::rub(195_000.0));
        assert_eq!(route.price, Money::rub(207_000.0));
    }

    #[test]
    fn heavier_band_used_when_light_missing() {
        let catalog = catalog(vec![rail(
            &["Vladivostok"],
            &["Vorsino"],
            "Moscow",
            None,
            Some(195_000.0),
            Some(12_000.0),
            None,
            None,
        )]);

        let route = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Dc20))
            .route
            .unwrap();
        assert_eq!(route.weight_tier, Some(WeightTier::Under28t));
    }

    #[test]
    fn forty_foot_needs_price_and_guard_fee() {
        let catalog = catalog(vec![
            rail(&["Vladivostok"], &["Vorsino"], "Moscow", Some(1.0), None, Some(1.0), Some(250_000.0), None),
            rail(&["Vladivostok"], &["Selyatino"], "Moscow", None, None, None, Some(260_000.0), Some(15_000.0)),
        ]);

        let route = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Hc40))
            .route
            .unwrap();
        // First record lacks the 40' guard fee, so scanning continues
        assert_eq!(route.arrival_station.as_deref(), Some("Selyatino"));
        assert_eq!(route.price, Money::rub(275_000.0));
    }

    #[test]
    fn incomplete_records_produce_one_failure_naming_port_and_city() {
        let catalog = catalog(vec![
            rail(&["Vladivostok"], &["Vorsino"], "Moscow", Some(1.0), None, None, None, None),
            rail(&["Vladivostok-2"], &["Vorsino"], "Moscow", None, None, Some(1.0), None, None),
        ]);

        let result = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Dc20));
        assert!(result.route.is_none());
        let failure = result.failure.unwrap();
        assert_eq!(failure.leg, LegKind::Rail);
        assert_eq!(failure.cause, FailureCause::IncompletePricing);
        assert!(failure.message.contains("Vladivostok"));
        assert!(failure.message.contains("Moscow"));
        assert!(failure.message.contains("20' guard fee"));
        assert!(failure.message.contains("20' tariff"));
    }

    #[test]
    fn incompatible_stations() {
        let catalog = catalog(vec![rail(
            &["Ussuriysk"],
            &["Vorsino"],
            "Moscow",
            Some(1.0),
            None,
            Some(1.0),
            None,
            None,
        )]);

        let failure = resolve_rail_leg(&catalog, &request("Vladivostok (terminal A)", ContainerType::Dc20))
            .failure
            .unwrap();
        assert_eq!(failure.cause, FailureCause::NoCompatibleStation);
        assert!(failure.message.contains("Vladivostok (terminal A)"));
        assert!(failure.message.contains("Moscow"));
    }

    #[test]
    fn no_records_for_city() {
        let catalog = catalog(vec![rail(
            &["Vladivostok"],
            &["Kleshikha"],
            "Novosibirsk",
            Some(1.0),
            None,
            Some(1.0),
            None,
            None,
        )]);

        let failure = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Dc20))
            .failure
            .unwrap();
        assert_eq!(failure.cause, FailureCause::NoRoute);
        assert_eq!(failure.message, "No rail rate from Vladivostok to Moscow.");
    }

    #[test]
    fn arrival_station_filter() {
        let catalog = catalog(vec![
            rail(&["Vladivostok"], &["Vorsino"], "Moscow", Some(100.0), None, Some(1.0), None, None),
            rail(&["Vladivostok"], &["Beliy Rast"], "Moscow", Some(200.0), None, Some(1.0), None, None),
        ]);

        let req = RailLegRequest {
            arrival_station: Some("beliy rast"),
            ..request("Vladivostok", ContainerType::Dc20)
        };
        let route = resolve_rail_leg(&catalog, &req).route.unwrap();
        assert_eq!(route.arrival_station.as_deref(), Some("Beliy Rast"));
        assert_eq!(route.price, Money::rub(201.0));

        let req = RailLegRequest {
            arrival_station: Some("Khovrino"),
            ..request("Vladivostok", ContainerType::Dc20)
        };
        let failure = resolve_rail_leg(&catalog, &req).failure.unwrap();
        assert_eq!(failure.cause, FailureCause::NoRoute);
        assert!(failure.message.contains("Khovrino"));
    }

    #[test]
    fn mixed_currency_is_incomplete() {
        let mut rate = rail(&["Vladivostok"], &["Vorsino"], "Moscow", Some(100.0), None, None, None, None);
        rate.guard_fee20 = Some(Money::usd(50.0));
        let catalog = catalog(vec![rate]);

        let failure = resolve_rail_leg(&catalog, &request("Vladivostok", ContainerType::Dc20))
            .failure
            .unwrap();
        assert_eq!(failure.cause, FailureCause::IncompletePricing);
        assert!(failure.message.contains("one currency"));
    }

    #[test]
    fn all_routes_lists_every_priced_record() {
        let catalog = catalog(vec![
            rail(&["Vladivostok"], &["Vorsino"], "Moscow", Some(100.0), None, Some(1.0), None, None),
            rail(&["Vladivostok"], &["Khovrino"], "Moscow", None, None, Some(1.0), None, None),
            rail(&["Ussuriysk"], &["Selyatino"], "Moscow", Some(50.0), None, Some(1.0), None, None),
            rail(&["Vladivostok"], &["Beliy Rast"], "Moscow", Some(200.0), None, Some(1.0), None, None),
        ]);

        let routes = resolve_rail_routes(&catalog, &request("Vladivostok", ContainerType::Dc20));
        let arrivals: Vec<_> = routes
            .iter()
            .map(|r| r.arrival_station.as_deref().unwrap())
            .collect();
        assert_eq!(arrivals, vec!["Vorsino", "Beliy Rast"]);
    }
}
