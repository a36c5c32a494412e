//! Drop-off fee lookup for carrier-owned and shipper-owned containers.

use serde::Serialize;

use crate::catalog::{CarrierDropOffFee, RateCatalog};
use crate::domain::{ContainerType, FeeAmount, Money};
use crate::matching::{NormalizedName, contains_ci, normalize};

use super::commentary::{FailureCause, LegFailure, LegKind};

/// Phrases in a sea rate comment that mean a drop-off fee applies.
const DROP_OFF_TRIGGERS: &[&str] = &["drop off", "drop-off"];

/// Carriers whose containers always incur a drop-off fee.
const ALWAYS_TRIGGER_CARRIERS: &[&str] = &["SINOKOR", "HEUNG-A", "SITC"];

/// Carrier that never charges a numeric drop-off fee.
const EXEMPT_CARRIER: &str = "FESCO";

/// Keys for a carrier-owned drop-off lookup.
#[derive(Debug, Clone, Copy)]
pub struct CarrierDropOffRequest<'a> {
    pub carrier: &'a str,
    /// City where the empty container is returned.
    pub city: &'a str,
    pub container: ContainerType,
    /// Comment of the matched sea rate, checked for trigger phrases.
    pub sea_comment: Option<&'a str>,
}

/// Keys for a shipper-owned drop-off lookup; matched exactly.
#[derive(Debug, Clone, Copy)]
pub struct ShipperDropOffRequest<'a> {
    pub departure_city: &'a str,
    pub drop_off_city: &'a str,
    pub container: ContainerType,
}

/// Outcome of a drop-off lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropOffResolution {
    /// Whether the route needs a drop-off fee at all.
    pub required: bool,
    pub cost: Option<Money>,
    pub comment: Option<String>,
    /// The carrier is exempt: there is no numeric fee by definition.
    pub not_applicable: bool,
    pub failure: Option<LegFailure>,
}

impl DropOffResolution {
    fn not_required() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Whether a carrier-owned drop-off fee applies to this sea leg.
pub fn carrier_drop_off_triggered(carrier: &str, sea_comment: Option<&str>) -> bool {
    let by_comment = sea_comment.is_some_and(|comment| {
        DROP_OFF_TRIGGERS
            .iter()
            .any(|phrase| contains_ci(comment, phrase))
    });
    by_comment || ALWAYS_TRIGGER_CARRIERS.iter().any(|c| carrier_matches(c, carrier))
}

/// Whether `carrier` is the exempt carrier.
pub fn is_exempt_carrier(carrier: &str) -> bool {
    carrier_matches(EXEMPT_CARRIER, carrier)
}

/// Carrier names match if the words of one appear, in order, among the
/// words of the other, ignoring case. "Sinokor Merchant Marine" matches
/// "SINOKOR"; "SC" does not match "FESCO".
fn carrier_matches(table_carrier: &str, carrier: &str) -> bool {
    let a = words(table_carrier);
    let b = words(carrier);
    !a.is_empty() && !b.is_empty() && (contains_words(&a, &b) || contains_words(&b, &a))
}

fn words(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_lowercase).collect()
}

fn contains_words(haystack: &[String], needle: &[String]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Look up the drop-off fee for a carrier-owned container.
pub fn resolve_carrier_drop_off(
    catalog: &RateCatalog,
    request: &CarrierDropOffRequest<'_>,
) -> DropOffResolution {
    if !carrier_drop_off_triggered(request.carrier, request.sea_comment) {
        return DropOffResolution::not_required();
    }

    let fee = find_carrier_fee(catalog, request.carrier, request.city);

    if is_exempt_carrier(request.carrier) {
        return DropOffResolution {
            required: true,
            cost: None,
            comment: fee.and_then(|f| f.comment.clone()),
            not_applicable: true,
            failure: None,
        };
    }

    let Some(fee) = fee else {
        return failed(
            None,
            FailureCause::NoRoute,
            format!(
                "No drop-off fee for {} in {}.",
                request.carrier, request.city
            ),
        );
    };

    match fee.fee_for(request.container) {
        Some(FeeAmount::Fixed(cost)) => DropOffResolution {
            required: true,
            cost: Some(cost),
            comment: fee.comment.clone(),
            not_applicable: false,
            failure: None,
        },
        Some(FeeAmount::OnRequest) => failed(
            fee.comment.clone(),
            FailureCause::OnRequest,
            format!(
                "Drop-off fee for {} in {} is quoted on request.",
                request.carrier, request.city
            ),
        ),
        None => failed(
            fee.comment.clone(),
            FailureCause::Unpriced,
            format!(
                "Drop-off for {} in {} has no {} fee.",
                request.carrier,
                request.city,
                size_label(request.container)
            ),
        ),
    }
}

/// Look up the repositioning fee for a shipper-owned container.
///
/// Attempted whenever shipper-owned rows are loaded; keys must match exactly
/// (surrounding whitespace aside).
pub fn resolve_shipper_drop_off(
    catalog: &RateCatalog,
    request: &ShipperDropOffRequest<'_>,
) -> DropOffResolution {
    if !catalog.has_shipper_drop_offs() {
        return DropOffResolution::not_required();
    }

    let row = catalog.shipper_drop_offs.iter().find(|row| {
        row.departure_city.trim() == request.departure_city.trim()
            && row.drop_off_city.trim() == request.drop_off_city.trim()
            && row.container_type == request.container
    });

    match row {
        Some(row) => match row.price {
            Some(cost) => DropOffResolution {
                required: true,
                cost: Some(cost),
                comment: None,
                not_applicable: false,
                failure: None,
            },
            None => failed(
                None,
                FailureCause::Unpriced,
                format!(
                    "SOC drop-off from {} to {} has no {} price.",
                    request.departure_city, request.drop_off_city, request.container
                ),
            ),
        },
        None => failed(
            None,
            FailureCause::NoRoute,
            format!(
                "No SOC drop-off fee from {} to {} for {}.",
                request.departure_city, request.drop_off_city, request.container
            ),
        ),
    }
}

fn find_carrier_fee<'c>(
    catalog: &'c RateCatalog,
    carrier: &str,
    city: &str,
) -> Option<&'c CarrierDropOffFee> {
    let city = normalize(city);
    catalog.carrier_drop_offs.iter().find(|fee| {
        carrier_matches(&fee.carrier, carrier) && fee.cities.iter().any(|c| serves(c, &city))
    })
}

/// Whether a fee row city covers `city`, which may be a port with a terminal
/// qualifier.
fn serves(fee_city: &str, city: &NormalizedName) -> bool {
    let fee_city = normalize(fee_city);
    fee_city.key() == city.key() || fee_city.key() == city.base_key()
}

fn failed(comment: Option<String>, cause: FailureCause, message: String) -> DropOffResolution {
    DropOffResolution {
        required: true,
        cost: None,
        comment,
        not_applicable: false,
        failure: Some(LegFailure::new(LegKind::DropOff, cause, message)),
    }
}

fn size_label(container: ContainerType) -> &'static str {
    if container.is_twenty_foot() { "20'" } else { "40'" }
}
