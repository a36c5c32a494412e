//! Quote types.

use serde::Serialize;

use crate::advisory::AdvisoryRequest;
use crate::catalog::ThroughRailOffer;
use crate::domain::{ContainerType, Money, Ownership};
use crate::resolve::{Commentary, FailureCause, RailRoute};

/// Whether every leg the route needs was priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStatus {
    Complete,
    /// At least one required leg is missing from the total.
    Partial,
}

/// The ocean leg of a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeaLegQuote {
    /// Tabulated price.
    pub base_cost: Option<Money>,
    /// Price with the sea margin applied.
    pub final_cost: Option<Money>,
    pub comment: Option<String>,
    pub failed: bool,
    /// Why the leg is unpriced, if it is.
    pub failure: Option<FailureCause>,
}

/// The inland rail leg of a quote, present only when the route needs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RailLegQuote {
    pub final_city: String,
    pub route: Option<RailRoute>,
    /// Route price with the rail margin applied.
    pub final_cost: Option<Money>,
    pub failed: bool,
}

/// The drop-off fee of a quote, present only when one applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropOffQuote {
    /// City the empty container is returned in.
    pub city: String,
    pub cost: Option<Money>,
    pub comment: Option<String>,
    /// The carrier never charges a numeric fee.
    pub not_applicable: bool,
    pub failed: bool,
}

/// A sea (+ rail) quote with at least one priced leg.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeaRailQuote {
    pub ownership: Ownership,
    pub origin: String,
    pub destination: String,
    pub container_type: ContainerType,
    pub carrier: Option<String>,
    pub sea: SeaLegQuote,
    pub rail: Option<RailLegQuote>,
    pub drop_off: Option<DropOffQuote>,
    pub commentary: Commentary,
    /// Sum of every priced leg, in USD.
    pub total: Money,
    pub status: PricingStatus,
    /// The commentary as one paragraph, for partial quotes.
    pub warning: Option<String>,
}

impl SeaRailQuote {
    pub fn is_partial(&self) -> bool {
        self.status == PricingStatus::Partial
    }

    /// Whether a rail leg was needed and could not be priced.
    pub fn rail_leg_failed(&self) -> bool {
        self.rail.as_ref().is_some_and(|rail| rail.failed)
    }

    /// Whether a drop-off fee was needed and could not be priced.
    pub fn drop_off_failed(&self) -> bool {
        self.drop_off.as_ref().is_some_and(|drop_off| drop_off.failed)
    }

    pub fn sea_leg_failed(&self) -> bool {
        self.sea.failed
    }

    /// Whether no sea record exists for the route at all, as opposed to a
    /// record without a price.
    pub fn sea_leg_unrouted(&self) -> bool {
        self.sea.failure == Some(FailureCause::NoRoute)
    }
}

/// A priced through-rail offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughRailQuote {
    pub offer: ThroughRailOffer,
    /// Offer price, in USD.
    pub total: Money,
}

/// A route with no priced leg: only diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticQuote {
    pub no_priced_components: bool,
    pub commentary: Commentary,
    pub advisory: AdvisoryRequest,
    /// Reply from the advisory service, once asked.
    pub advice: Option<String>,
}

/// The outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Quote {
    SeaRail(SeaRailQuote),
    ThroughRail(ThroughRailQuote),
    DiagnosticOnly(DiagnosticQuote),
}

impl Quote {
    /// The total, if anything was priced.
    pub fn total(&self) -> Option<Money> {
        match self {
            Quote::SeaRail(quote) => Some(quote.total),
            Quote::ThroughRail(quote) => Some(quote.total),
            Quote::DiagnosticOnly(_) => None,
        }
    }
}
