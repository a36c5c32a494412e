//! Quote requests.

use serde::{Deserialize, Serialize};

use crate::domain::{ContainerType, DomainError, Ownership, WeightTier};

/// A sea (+ rail) shipment query.
///
/// Only ownership, origin and container type are mandatory. A single quote
/// additionally needs a destination; best-price search fills in whatever is
/// left open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub ownership: Ownership,
    pub origin: String,
    pub container_type: ContainerType,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    /// City the container travels on to by rail after the sea leg.
    #[serde(default)]
    pub final_rail_city: Option<String>,
    /// Restrict rail rates to this arrival station.
    #[serde(default)]
    pub rail_station: Option<String>,
    #[serde(default)]
    pub weight_tier: Option<WeightTier>,
    /// Flat margin added to the sea price, in the sea rate's currency.
    #[serde(default)]
    pub sea_margin: f64,
    /// Flat margin added to the rail price, in the rail rate's currency.
    #[serde(default)]
    pub rail_margin: f64,
}

impl RouteQuery {
    /// Create a query with only the mandatory fields.
    pub fn new(ownership: Ownership, origin: impl Into<String>, container_type: ContainerType) -> Self {
        Self {
            ownership,
            origin: origin.into(),
            container_type,
            destination: None,
            carrier: None,
            final_rail_city: None,
            rail_station: None,
            weight_tier: None,
            sea_margin: 0.0,
            rail_margin: 0.0,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    pub fn with_final_rail_city(mut self, city: impl Into<String>) -> Self {
        self.final_rail_city = Some(city.into());
        self
    }

    pub fn with_rail_station(mut self, station: impl Into<String>) -> Self {
        self.rail_station = Some(station.into());
        self
    }

    pub fn with_weight_tier(mut self, tier: WeightTier) -> Self {
        self.weight_tier = Some(tier);
        self
    }

    pub fn with_margins(mut self, sea_margin: f64, rail_margin: f64) -> Self {
        self.sea_margin = sea_margin;
        self.rail_margin = rail_margin;
        self
    }

    /// Destination, treating blank input as absent.
    pub fn destination(&self) -> Option<&str> {
        non_blank(&self.destination)
    }

    pub fn carrier(&self) -> Option<&str> {
        non_blank(&self.carrier)
    }

    pub fn final_rail_city(&self) -> Option<&str> {
        non_blank(&self.final_rail_city)
    }

    pub fn rail_station(&self) -> Option<&str> {
        non_blank(&self.rail_station)
    }

    /// Validate the fields every resolution needs.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin.trim().is_empty() {
            return Err(DomainError::MissingField("origin"));
        }
        if !self.sea_margin.is_finite() {
            return Err(DomainError::InvalidMargin("sea_margin"));
        }
        if !self.rail_margin.is_finite() {
            return Err(DomainError::InvalidMargin("rail_margin"));
        }
        Ok(())
    }
}

/// A through-rail lookup; every key is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughRailQuery {
    pub agent: String,
    pub departure_city: String,
    pub destination_city: String,
    pub incoterms: String,
    pub border: String,
}

impl ThroughRailQuery {
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("agent", &self.agent),
            ("departure_city", &self.departure_city),
            ("destination_city", &self.destination_city),
            ("incoterms", &self.incoterms),
            ("border", &self.border),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(DomainError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

/// Anything that can be quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QuoteRequest {
    Route(RouteQuery),
    ThroughRail(ThroughRailQuery),
}

impl QuoteRequest {
    /// Validate the request for a single quote.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            QuoteRequest::Route(query) => {
                query.validate()?;
                if query.destination().is_none() {
                    return Err(DomainError::MissingField("destination"));
                }
                Ok(())
            }
            QuoteRequest::ThroughRail(query) => query.validate(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
