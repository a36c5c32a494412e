//! Sea hub classification.
//!
//! A hub is a sea terminal from which containers continue inland by rail.
//! Rate sheets spell the same hub several ways, often with a terminal
//! qualifier in parentheses.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::names::normalize;

const VLADIVOSTOK_VARIANTS: &[&str] = &[
    "Vladivostok",
    "Vladivostok (VMTP)",
    "Vladivostok (FESCO)",
    "Vladivostok (terminal A)",
    "Vladivostok (Pervaya Rechka)",
    "Vladivostok (Sollers)",
    "Владивосток",
];

const VOSTOCHNY_VARIANTS: &[&str] = &[
    "Vostochny",
    "Vostochnyy",
    "Vostochny (VSK)",
    "Vostochny (VICS)",
    "Nakhodka (Vostochny)",
    "Восточный",
];

/// A family of port spellings that denote one physical hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HubFamily {
    Vladivostok,
    Vostochny,
}

impl HubFamily {
    pub const ALL: [HubFamily; 2] = [HubFamily::Vladivostok, HubFamily::Vostochny];

    /// Known spellings of this hub.
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            HubFamily::Vladivostok => VLADIVOSTOK_VARIANTS,
            HubFamily::Vostochny => VOSTOCHNY_VARIANTS,
        }
    }

    /// Comparison keys of [`Self::variants`], normalized once.
    fn variant_keys(&self) -> &'static [String] {
        static VLADIVOSTOK: OnceLock<Vec<String>> = OnceLock::new();
        static VOSTOCHNY: OnceLock<Vec<String>> = OnceLock::new();

        let cell = match self {
            HubFamily::Vladivostok => &VLADIVOSTOK,
            HubFamily::Vostochny => &VOSTOCHNY,
        };
        cell.get_or_init(|| {
            self.variants()
                .iter()
                .map(|variant| normalize(variant).key().to_string())
                .collect()
        })
    }

    fn matches(&self, port_key: &str, port_base: &str) -> bool {
        self.variant_keys()
            .iter()
            .any(|key| key == port_key || key == port_base)
    }
}

impl fmt::Display for HubFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubFamily::Vladivostok => f.write_str("Vladivostok"),
            HubFamily::Vostochny => f.write_str("Vostochny"),
        }
    }
}

/// Classify a sea port into a hub family.
///
/// A port classifies if its full name or its base name (the part before a
/// parenthesized qualifier) equals a known variant.
///
/// ```
/// use quote_server::matching::{HubFamily, classify_hub};
///
/// assert_eq!(classify_hub("Vladivostok (terminal A)"), Some(HubFamily::Vladivostok));
/// assert_eq!(classify_hub("vostochny (vsk)"), Some(HubFamily::Vostochny));
/// assert_eq!(classify_hub("Busan"), None);
/// ```
pub fn classify_hub(port: &str) -> Option<HubFamily> {
    let port = normalize(port);
    HubFamily::ALL
        .into_iter()
        .find(|family| family.matches(port.key(), port.base_key()))
}

/// Whether a quote needs an inland rail leg after the sea leg.
///
/// True iff a final city is requested, the sea destination is a hub, and
/// the final city is not the hub itself. The hub's own city is compared
/// both with and without its terminal qualifier, so a final city of
/// "Vladivostok" needs no rail after "Vladivostok (VMTP)".
pub fn further_rail_required(final_city: Option<&str>, sea_destination: &str) -> bool {
    let Some(final_city) = final_city.filter(|c| !c.trim().is_empty()) else {
        return false;
    };
    if classify_hub(sea_destination).is_none() {
        return false;
    }

    let city = normalize(final_city);
    let port = normalize(sea_destination);
    city.key() != port.key() && city.key() != port.base_key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_classifies_into_its_family() {
        for family in HubFamily::ALL {
            for variant in family.variants() {
                assert_eq!(classify_hub(variant), Some(family), "variant {variant}");
            }
        }
    }

    #[test]
    fn variant_keys_are_normalized() {
        assert_eq!(HubFamily::Vladivostok.variant_keys()[0], "vladivostok");
        assert_eq!(
            HubFamily::Vostochny.variant_keys().len(),
            HubFamily::Vostochny.variants().len()
        );
        // "Восточный" is an alias of Vostochny
        assert!(HubFamily::Vostochny.variant_keys().iter().all(|k| k != "восточный"));
    }

    #[test]
    fn unknown_qualifier_classifies_by_base_name() {
        assert_eq!(
            classify_hub("Vladivostok (new berth)"),
            Some(HubFamily::Vladivostok)
        );
        assert_eq!(classify_hub("Vostochnyy (VSK)"), Some(HubFamily::Vostochny));
    }

    #[test]
    fn non_hubs() {
        assert_eq!(classify_hub("Shanghai"), None);
        assert_eq!(classify_hub("Saint Petersburg"), None);
        assert_eq!(classify_hub(""), None);
        assert_eq!(classify_hub("Nakhodka"), None);
    }

    #[test]
    fn rail_needs_final_city() {
        assert!(!further_rail_required(None, "Vladivostok"));
        assert!(!further_rail_required(Some("  "), "Vladivostok"));
    }

    #[test]
    fn rail_needs_hub_destination() {
        assert!(!further_rail_required(Some("Moscow"), "Saint Petersburg"));
        assert!(further_rail_required(Some("Moscow"), "Vladivostok (terminal A)"));
    }

    #[test]
    fn rail_not_needed_when_final_city_is_the_hub() {
        assert!(!further_rail_required(Some("Vladivostok"), "Vladivostok"));
        assert!(!further_rail_required(Some("г. Владивосток"), "Vladivostok (VMTP)"));
        assert!(!further_rail_required(
            Some("vladivostok (terminal a)"),
            "Vladivostok (terminal A)"
        ));
    }

    #[test]
    fn both_families_follow_the_same_rules() {
        for family in HubFamily::ALL {
            let port = family.variants()[0];
            assert!(further_rail_required(Some("Moscow"), port));
            assert!(!further_rail_required(Some(port), port));
        }
    }
}
