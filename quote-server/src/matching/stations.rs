//! Rail station compatibility with sea ports.
//!
//! Decides whether a rail departure station can take containers discharged
//! at a given sea port. The rules are heuristic keyword tests and are applied
//! in a fixed order; the first rule that applies decides.

use super::names::{contains_ci, normalize};

/// Terminal operator tokens found in port names, with the station keyword
/// their containers are railed from.
const TERMINAL_OPERATORS: &[(&str, &str)] = &[
    ("VMTP", "Pervaya Rechka"),
    ("FESCO", "Pervaya Rechka"),
    ("Sollers", "Ugolnaya"),
    ("VSK", "Vostochny Port"),
    ("VICS", "Nakhodka-Vostochnaya"),
];

/// Station keywords identifying the rail terminals of a metropolitan area.
const AREA_STATIONS: &[(&str, &[&str])] = &[
    (
        "moscow",
        &["Vorsino", "Selyatino", "Beliy Rast", "Elektrougli", "Khovrino", "Kuntsevo"],
    ),
    (
        "saint petersburg",
        &["Shushary", "Avtovo", "Predportovaya"],
    ),
    ("novosibirsk", &["Kleshikha", "Inya-Vostochnaya"]),
    ("yekaterinburg", &["Sverdlovsk-Tovarny", "Koltsovo"]),
];

/// Minimum length of a qualifier keyword; shorter tokens ("A", "No") match too much.
const MIN_KEYWORD_CHARS: usize = 3;

/// Which rule decided a compatibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompatibilityRule {
    /// The port names a terminal operator
    TerminalOperator,
    /// The port carries a parenthesized qualifier
    Qualifier,
    /// Fallback comparison of base names
    BaseName,
}

/// Whether `departure_station` can receive containers from `sea_port`.
///
/// ```
/// use quote_server::matching::is_compatible;
///
/// assert!(is_compatible("Pervaya Rechka (export)", "Vladivostok (VMTP)"));
/// assert!(!is_compatible("Ugolnaya", "Vladivostok (VMTP)"));
/// assert!(is_compatible("Vladivostok", "Vladivostok"));
/// ```
pub fn is_compatible(departure_station: &str, sea_port: &str) -> bool {
    check(departure_station, sea_port).0
}

/// Compatibility result together with the rule that produced it.
pub(crate) fn check(departure_station: &str, sea_port: &str) -> (bool, CompatibilityRule) {
    // 1. Terminal operator named in the port
    if let Some((_, keyword)) = TERMINAL_OPERATORS
        .iter()
        .find(|(token, _)| contains_ci(sea_port, token))
    {
        return (
            contains_ci(departure_station, keyword),
            CompatibilityRule::TerminalOperator,
        );
    }

    // 2. Parenthesized qualifier
    let keywords = qualifier_keywords(sea_port);
    if !keywords.is_empty() {
        let compatible = keywords.iter().any(|kw| contains_ci(departure_station, kw));
        return (compatible, CompatibilityRule::Qualifier);
    }

    // 3. Base-name substring, either direction
    let station = normalize(departure_station);
    let port = normalize(sea_port);
    let station_base = station.first_token();
    let port_base = port.first_token();
    let compatible = !station_base.is_empty()
        && !port_base.is_empty()
        && (station_base.contains(port_base) || port_base.contains(station_base));
    (compatible, CompatibilityRule::BaseName)
}

/// Keywords from the first parenthesized qualifier of a port name.
fn qualifier_keywords(sea_port: &str) -> Vec<String> {
    let Some(open) = sea_port.find('(') else {
        return Vec::new();
    };
    let inner = &sea_port[open + 1..];
    let inner = match inner.find(')') {
        Some(close) => &inner[..close],
        None => inner,
    };

    inner
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | ';'))
        .filter(|kw| kw.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Whether a rail record's arrival side serves `requested_city`.
///
/// Matches on the record's arrival city, or, for known metropolitan areas,
/// on any arrival station carrying one of the area's station keywords.
pub fn arrival_serves_city(
    arrival_city: &str,
    arrival_stations: &[String],
    requested_city: &str,
) -> bool {
    let requested = normalize(requested_city);
    if normalize(arrival_city).key() == requested.key() {
        return true;
    }

    area_station_keywords(requested.key()).iter().any(|kw| {
        arrival_stations
            .iter()
            .any(|station| contains_ci(station, kw))
    })
}

/// Station keywords for a metropolitan area, by normalized city key.
pub fn area_station_keywords(city_key: &str) -> &'static [&'static str] {
    AREA_STATIONS
        .iter()
        .find(|(city, _)| *city == city_key)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}
