//! Quote composition.
//!
//! Runs the leg resolvers for one request, applies margins, totals the
//! priced legs and classifies the outcome. Composition never fails on a
//! missing price: unpriced legs end up in the commentary trail.

use tracing::debug;

use crate::advisory::AdvisoryRequest;
use crate::catalog::RateCatalog;
use crate::domain::{DomainError, Money, Ownership};
use crate::matching::further_rail_required;
use crate::resolve::{
    CarrierDropOffRequest, Commentary, DropOffResolution, RailLegRequest, RailRoute,
    SeaLegRequest, ShipperDropOffRequest, resolve_carrier_drop_off, resolve_rail_leg,
    resolve_sea_leg, resolve_shipper_drop_off, resolve_through_rail,
};

use super::config::QuoteConfig;
use super::model::{
    DiagnosticQuote, DropOffQuote, PricingStatus, Quote, RailLegQuote, SeaLegQuote, SeaRailQuote,
    ThroughRailQuote,
};
use super::query::{QuoteRequest, RouteQuery, ThroughRailQuery};

/// How the rail leg, if one is needed, gets priced.
#[derive(Debug, Clone)]
pub(crate) enum RailPlan {
    /// Look the leg up in the rail table.
    Lookup,
    /// Use this already resolved routing.
    Routed(RailRoute),
}

/// Result of composing one sea (+ rail) route.
#[derive(Debug, Clone)]
pub(crate) enum Composition {
    Priced(SeaRailQuote),
    Unpriced {
        commentary: Commentary,
        advisory: AdvisoryRequest,
    },
}

/// Resolve a request against the catalog.
///
/// Returns an error only for malformed requests; anything the catalog cannot
/// price comes back inside the quote.
pub fn resolve(
    request: &QuoteRequest,
    catalog: &RateCatalog,
    config: &QuoteConfig,
) -> Result<Quote, DomainError> {
    request.validate()?;

    match request {
        QuoteRequest::Route(query) => {
            let destination = query
                .destination()
                .ok_or(DomainError::MissingField("destination"))?;
            let composition = compose_route(
                query,
                destination,
                query.carrier(),
                RailPlan::Lookup,
                catalog,
                config,
            );
            Ok(match composition {
                Composition::Priced(quote) => Quote::SeaRail(quote),
                Composition::Unpriced {
                    commentary,
                    advisory,
                } => Quote::DiagnosticOnly(DiagnosticQuote {
                    no_priced_components: true,
                    commentary,
                    advisory,
                    advice: None,
                }),
            })
        }
        QuoteRequest::ThroughRail(query) => Ok(resolve_through_rail_quote(query, catalog, config)),
    }
}

fn resolve_through_rail_quote(
    query: &ThroughRailQuery,
    catalog: &RateCatalog,
    config: &QuoteConfig,
) -> Quote {
    match resolve_through_rail(catalog, query) {
        Ok(offer) => Quote::ThroughRail(ThroughRailQuote {
            offer: offer.clone(),
            total: Money::usd(offer.price.to_usd(config.rub_per_usd)),
        }),
        Err(failure) => {
            debug!(agent = %query.agent, border = %query.border, "No through-rail offer");
            let mut commentary = Commentary::new();
            commentary.push(failure);
            Quote::DiagnosticOnly(DiagnosticQuote {
                no_priced_components: true,
                commentary,
                advisory: AdvisoryRequest {
                    origin: query.departure_city.clone(),
                    destination: query.destination_city.clone(),
                    container_type: None,
                    final_rail_city: None,
                },
                advice: None,
            })
        }
    }
}

/// Compose one route: a fixed destination and carrier, and a rail plan used
/// only if the route needs a rail leg.
pub(crate) fn compose_route(
    query: &RouteQuery,
    destination: &str,
    carrier: Option<&str>,
    rail_plan: RailPlan,
    catalog: &RateCatalog,
    config: &QuoteConfig,
) -> Composition {
    let mut commentary = Commentary::new();

    // Sea
    let sea = resolve_sea_leg(
        catalog,
        &SeaLegRequest {
            ownership: query.ownership,
            origin: &query.origin,
            destination,
            carrier,
            container: query.container_type,
        },
    );
    commentary.record(sea.failure.as_ref());
    let sea_quote = SeaLegQuote {
        base_cost: sea.price,
        final_cost: sea.price.map(|price| price.with_margin(query.sea_margin)),
        comment: sea.comment.clone(),
        failed: sea.failure.is_some(),
        failure: sea.failure.as_ref().map(|failure| failure.cause),
    };

    // Rail
    let final_city = query.final_rail_city();
    let rail_quote = match final_city {
        Some(city) if further_rail_required(Some(city), destination) => {
            let route = match rail_plan {
                RailPlan::Routed(route) => Some(route),
                RailPlan::Lookup => {
                    let resolution = resolve_rail_leg(
                        catalog,
                        &RailLegRequest {
                            sea_port: destination,
                            final_city: city,
                            arrival_station: query.rail_station(),
                            container: query.container_type,
                            weight_tier: query.weight_tier,
                        },
                    );
                    commentary.record(resolution.failure.as_ref());
                    resolution.route
                }
            };
            Some(RailLegQuote {
                final_city: city.to_string(),
                final_cost: route
                    .as_ref()
                    .map(|route| route.price.with_margin(query.rail_margin)),
                failed: route.is_none(),
                route,
            })
        }
        _ => None,
    };

    // Drop-off
    let drop_off_city = match &rail_quote {
        Some(rail) => rail.final_city.clone(),
        None => destination.to_string(),
    };
    let attributed_carrier = carrier.or_else(|| sea.carrier()).map(str::to_string);
    let drop_off = match query.ownership {
        Ownership::Coc => match attributed_carrier.as_deref() {
            Some(carrier) => resolve_carrier_drop_off(
                catalog,
                &CarrierDropOffRequest {
                    carrier,
                    city: &drop_off_city,
                    container: query.container_type,
                    sea_comment: sea.comment.as_deref(),
                },
            ),
            None => DropOffResolution::default(),
        },
        Ownership::Soc => resolve_shipper_drop_off(
            catalog,
            &ShipperDropOffRequest {
                departure_city: &query.origin,
                drop_off_city: &drop_off_city,
                container: query.container_type,
            },
        ),
    };
    commentary.record(drop_off.failure.as_ref());
    let drop_off_quote = drop_off.required.then(|| DropOffQuote {
        city: drop_off_city.clone(),
        cost: drop_off.cost,
        comment: drop_off.comment.clone(),
        not_applicable: drop_off.not_applicable,
        failed: drop_off.failed(),
    });

    // Classify
    let rail_priced = rail_quote.as_ref().is_some_and(|rail| !rail.failed);
    let usable = !sea_quote.failed || rail_priced;
    if !usable {
        debug!(
            origin = %query.origin,
            destination,
            entries = commentary.len(),
            "No priced components"
        );
        return Composition::Unpriced {
            commentary,
            advisory: AdvisoryRequest {
                origin: query.origin.clone(),
                destination: destination.to_string(),
                container_type: Some(query.container_type),
                final_rail_city: final_city.map(str::to_string),
            },
        };
    }

    let total: f64 = [
        sea_quote.final_cost,
        rail_quote.as_ref().and_then(|rail| rail.final_cost),
        drop_off_quote.as_ref().and_then(|drop_off| drop_off.cost),
    ]
    .into_iter()
    .flatten()
    .map(|cost| cost.to_usd(config.rub_per_usd))
    .sum();

    let partial = sea_quote.failed
        || rail_quote.as_ref().is_some_and(|rail| rail.failed)
        || drop_off_quote.as_ref().is_some_and(|drop_off| drop_off.failed);
    let (status, warning) = if partial {
        (PricingStatus::Partial, Some(commentary.to_text()))
    } else {
        (PricingStatus::Complete, None)
    };

    debug!(
        origin = %query.origin,
        destination,
        carrier = attributed_carrier.as_deref(),
        total,
        partial,
        "Route composed"
    );

    Composition::Priced(SeaRailQuote {
        ownership: query.ownership,
        origin: query.origin.clone(),
        destination: destination.to_string(),
        container_type: query.container_type,
        carrier: attributed_carrier,
        sea: sea_quote,
        rail: rail_quote,
        drop_off: drop_off_quote,
        commentary,
        total: Money::usd(total),
        status,
        warning,
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::{catalog, rail, sea};
    use super::*;
    use crate::catalog::ThroughRailOffer;
    use crate::domain::ContainerType;
    use crate::resolve::{FailureCause, LegKind};

    fn route(destination: &str) -> RouteQuery {
        RouteQuery::new(Ownership::Coc, "Shanghai", ContainerType::Dc20).with_destination(destination)
    }

    fn sea_rail(quote: Quote) -> SeaRailQuote {
        match quote {
            Quote::SeaRail(quote) => quote,
            other => panic!("expected sea/rail quote, got {other:?}"),
        }
    }

    fn quote(query: RouteQuery) -> SeaRailQuote {
        sea_rail(resolve(&QuoteRequest::Route(query), &catalog(), &QuoteConfig::default()).unwrap())
    }

    #[test]
    fn terminal_a_without_final_city_is_sea_only() {
        let quote = quote(route("Vladivostok (terminal A)"));

        // First priced record in table order
        assert_eq!(quote.carrier.as_deref(), Some("MSC"));
        assert_eq!(quote.sea.base_cost, Some(Money::usd(1500.0)));
        assert!(quote.rail.is_none());
        assert!(quote.drop_off.is_none());
        assert_eq!(quote.status, PricingStatus::Complete);
        assert!(quote.commentary.is_empty());
        assert_eq!(quote.total, Money::usd(1500.0));
    }

    #[test]
    fn margin_round_trip() {
        let with_margin = quote(route("Vladivostok (terminal A)").with_margins(500.0, 0.0));
        assert_eq!(with_margin.sea.final_cost, Some(Money::usd(2000.0)));
        assert_eq!(with_margin.sea.base_cost, Some(Money::usd(1500.0)));

        let without = quote(route("Vladivostok (terminal A)").with_margins(0.0, 0.0));
        assert_eq!(without.sea.final_cost, Some(Money::usd(1500.0)));
    }

    #[test]
    fn terminal_a_to_moscow_adds_rail() {
        let quote = quote(
            route("Vladivostok (terminal A)")
                .with_final_rail_city("Moscow")
                .with_margins(0.0, 10_000.0),
        );

        let rail = quote.rail.as_ref().unwrap();
        assert!(!rail.failed);
        let route = rail.route.as_ref().unwrap();
        assert_eq!(route.departure_station, "Terminal A");
        assert_eq!(route.price, Money::rub(190_000.0));
        assert_eq!(rail.final_cost, Some(Money::rub(200_000.0)));
        assert_eq!(quote.status, PricingStatus::Complete);
        // 1500 USD + 200 000 RUB at 95
        let expected = 1500.0 + 200_000.0 / 95.0;
        assert!((quote.total.amount - expected).abs() < 1e-9);
    }

    #[test]
    fn rail_failure_is_partial_and_names_port_and_city() {
        let mut catalog = catalog();
        catalog.rail_rates = vec![rail(&["Ussuriysk"], &["Vorsino"], "Moscow", 1.0, 1.0)];
        let query = route("Vladivostok (terminal A)").with_final_rail_city("Moscow");

        let quote = sea_rail(
            resolve(&QuoteRequest::Route(query), &catalog, &QuoteConfig::default()).unwrap(),
        );
        assert_eq!(quote.sea.final_cost, Some(Money::usd(1500.0)));
        assert!(quote.rail_leg_failed());
        assert!(quote.is_partial());
        assert_eq!(quote.total, Money::usd(1500.0));

        assert_eq!(quote.commentary.len(), 1);
        let entry = &quote.commentary.entries()[0];
        assert_eq!(entry.leg, LegKind::Rail);
        assert!(entry.message.contains("Vladivostok (terminal A)"));
        assert!(entry.message.contains("Moscow"));
        assert_eq!(quote.warning.as_deref(), Some(entry.message.as_str()));
    }

    #[test]
    fn final_city_equal_to_port_needs_no_rail() {
        let mut catalog = catalog();
        // A rail table that would fail loudly if consulted
        catalog.rail_rates = vec![rail(&["Nowhere"], &["Nowhere"], "Vladivostok", 1.0, 1.0)];

        for city in ["Vladivostok (terminal A)", "vladivostok", "г. Владивосток"] {
            let query = route("Vladivostok (terminal A)").with_final_rail_city(city);
            let quote = sea_rail(
                resolve(&QuoteRequest::Route(query), &catalog, &QuoteConfig::default()).unwrap(),
            );
            assert!(quote.rail.is_none(), "city {city}");
            assert!(!quote.commentary.mentions(LegKind::Rail));
        }
    }

    #[test]
    fn non_hub_destination_never_needs_rail() {
        let quote = quote(route("Busan").with_final_rail_city("Moscow"));
        assert!(quote.rail.is_none());
        assert_eq!(quote.total, Money::usd(600.0));
    }

    #[test]
    fn always_trigger_carrier_adds_drop_off_at_rail_city() {
        let quote = quote(
            route("Vladivostok (terminal A)")
                .with_carrier("SINOKOR")
                .with_final_rail_city("Moscow"),
        );

        let drop_off = quote.drop_off.as_ref().unwrap();
        assert_eq!(drop_off.city, "Moscow");
        assert_eq!(drop_off.cost, Some(Money::usd(250.0)));
        assert_eq!(drop_off.comment.as_deref(), Some("payable at destination"));
        let expected = 1400.0 + 190_000.0 / 95.0 + 250.0;
        assert!((quote.total.amount - expected).abs() < 1e-9);
        assert_eq!(quote.status, PricingStatus::Complete);
    }

    #[test]
    fn drop_off_at_sea_destination_without_rail() {
        let quote = quote(route("Vladivostok (terminal A)").with_carrier("SINOKOR"));
        let drop_off = quote.drop_off.as_ref().unwrap();
        assert_eq!(drop_off.city, "Vladivostok (terminal A)");
        assert_eq!(quote.total, Money::usd(1650.0));
    }

    #[test]
    fn drop_off_fee_for_city_covers_qualified_port() {
        let mut catalog = catalog();
        catalog.sea_rates.push(sea(
            Ownership::Coc,
            &["Shanghai"],
            &["Vladivostok (VMTP)"],
            &["SINOKOR"],
            &[(ContainerType::Dc20, Some(1300.0))],
            None,
        ));
        catalog.carrier_drop_offs[0].cities = vec!["Vladivostok".to_string()];

        let request = QuoteRequest::Route(route("Vladivostok (VMTP)").with_carrier("SINOKOR"));
        let quote = sea_rail(resolve(&request, &catalog, &QuoteConfig::default()).unwrap());

        let drop_off = quote.drop_off.as_ref().unwrap();
        assert_eq!(drop_off.city, "Vladivostok (VMTP)");
        assert_eq!(drop_off.cost, Some(Money::usd(250.0)));
        assert_eq!(quote.status, PricingStatus::Complete);
        assert_eq!(quote.total, Money::usd(1550.0));
    }

    #[test]
    fn exempt_carrier_drop_off_is_not_applicable() {
        let quote = quote(route("Vostochny").with_final_rail_city("Moscow"));

        assert_eq!(quote.carrier.as_deref(), Some("FESCO"));
        let drop_off = quote.drop_off.as_ref().unwrap();
        assert!(drop_off.not_applicable);
        assert!(!drop_off.failed);
        assert_eq!(drop_off.cost, None);
        assert_eq!(quote.status, PricingStatus::Complete);
        let expected = 1600.0 + 190_000.0 / 95.0;
        assert!((quote.total.amount - expected).abs() < 1e-9);
    }

    #[test]
    fn missing_drop_off_fee_is_partial() {
        let quote = quote(
            route("Vladivostok (terminal A)")
                .with_carrier("SINOKOR")
                .with_final_rail_city("Novosibirsk"),
        );

        assert!(quote.is_partial());
        assert!(quote.rail_leg_failed());
        assert!(quote.drop_off_failed());
        assert!(quote.commentary.mentions(LegKind::DropOff));
        assert_eq!(quote.total, Money::usd(1400.0));
    }

    #[test]
    fn shipper_owned_drop_off_uses_origin_and_rail_city() {
        let query = RouteQuery::new(Ownership::Soc, "Shanghai", ContainerType::Dc20)
            .with_destination("Vladivostok")
            .with_final_rail_city("Moscow");
        let quote = quote(query);

        assert_eq!(quote.sea.base_cost, Some(Money::usd(900.0)));
        let drop_off = quote.drop_off.as_ref().unwrap();
        assert_eq!(drop_off.cost, Some(Money::usd(400.0)));
        assert_eq!(quote.status, PricingStatus::Complete);
    }

    #[test]
    fn shipper_owned_drop_off_missing_row_is_partial() {
        let query = RouteQuery::new(Ownership::Soc, "Shanghai", ContainerType::Dc20)
            .with_destination("Vladivostok");
        let quote = quote(query);

        assert!(quote.drop_off_failed());
        assert_eq!(
            quote.commentary.entries()[0].cause,
            FailureCause::NoRoute
        );
        assert_eq!(quote.total, Money::usd(900.0));
    }

    #[test]
    fn nothing_priced_is_diagnostic_only() {
        let query = route("Incheon").with_final_rail_city("Moscow");
        let quote = resolve(&QuoteRequest::Route(query), &catalog(), &QuoteConfig::default()).unwrap();

        let Quote::DiagnosticOnly(diagnostic) = quote else {
            panic!("expected diagnostic quote");
        };
        assert!(diagnostic.no_priced_components);
        assert_eq!(diagnostic.commentary.entries()[0].cause, FailureCause::NoRoute);
        assert_eq!(diagnostic.advisory.destination, "Incheon");
        assert_eq!(diagnostic.advisory.final_rail_city.as_deref(), Some("Moscow"));
        assert_eq!(diagnostic.advice, None);
    }

    #[test]
    fn unpriced_sea_with_priced_rail_is_partial() {
        let mut catalog = catalog();
        catalog.sea_rates = vec![sea(
            Ownership::Coc,
            &["Shanghai"],
            &["Vladivostok"],
            &["MSC"],
            &[(ContainerType::Dc20, None)],
            Some("rate on request"),
        )];
        let query = route("Vladivostok").with_final_rail_city("Moscow");

        let quote = sea_rail(
            resolve(&QuoteRequest::Route(query), &catalog, &QuoteConfig::default()).unwrap(),
        );
        assert!(quote.sea_leg_failed());
        assert_eq!(quote.sea.comment.as_deref(), Some("rate on request"));
        assert!(!quote.rail_leg_failed());
        assert!(quote.is_partial());
        assert_eq!(quote.commentary.entries()[0].cause, FailureCause::Unpriced);
    }

    #[test]
    fn through_rail_quote() {
        let mut catalog = catalog();
        catalog.through_rail_offers.push(ThroughRailOffer {
            agent: "RailCo".to_string(),
            departure_city: "Xi'an".to_string(),
            departure_station: "Xinzhu".to_string(),
            border: "Dostyk".to_string(),
            destination_city: "Moscow".to_string(),
            incoterms: "FCA".to_string(),
            price: Money::usd(3900.0),
            etd: "weekly".to_string(),
            commentary: None,
        });
        let mut query = ThroughRailQuery {
            agent: "railco".to_string(),
            departure_city: "Xi'an".to_string(),
            destination_city: "Moscow".to_string(),
            incoterms: "FCA".to_string(),
            border: "Dostyk".to_string(),
        };

        let quote = resolve(&QuoteRequest::ThroughRail(query.clone()), &catalog, &QuoteConfig::default()).unwrap();
        assert_eq!(quote.total(), Some(Money::usd(3900.0)));

        query.border = "Zabaikalsk".to_string();
        let quote = resolve(&QuoteRequest::ThroughRail(query), &catalog, &QuoteConfig::default()).unwrap();
        let Quote::DiagnosticOnly(diagnostic) = quote else {
            panic!("expected diagnostic quote");
        };
        assert!(diagnostic.commentary.mentions(LegKind::ThroughRail));
        assert_eq!(diagnostic.advisory.container_type, None);
    }

    #[test]
    fn malformed_requests_are_errors() {
        let query = RouteQuery::new(Ownership::Coc, "Shanghai", ContainerType::Dc20);
        let result = resolve(&QuoteRequest::Route(query), &catalog(), &QuoteConfig::default());
        assert!(matches!(result, Err(DomainError::MissingField("destination"))));
    }

    #[test]
    fn resolution_is_deterministic() {
        let query = QuoteRequest::Route(
            route("Vladivostok (terminal A)")
                .with_carrier("SINOKOR")
                .with_final_rail_city("Moscow"),
        );
        let catalog = catalog();
        let config = QuoteConfig::default();
        assert_eq!(
            resolve(&query, &catalog, &config).unwrap(),
            resolve(&query, &catalog, &config).unwrap()
        );
    }
}
