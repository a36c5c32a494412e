//! The immutable rate catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Ownership;

use super::error::CatalogError;
use super::tables::{
    CarrierDropOffFee, RailLegRate, SeaRouteRate, ShipperDropOffFee, ThroughRailOffer,
};

/// All rate tables, as produced by one ingestion run.
///
/// Resolvers only ever read a catalog. A new upload builds a new catalog and
/// replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateCatalog {
    #[serde(default)]
    pub sea_rates: Vec<SeaRouteRate>,
    #[serde(default)]
    pub rail_rates: Vec<RailLegRate>,
    #[serde(default)]
    pub carrier_drop_offs: Vec<CarrierDropOffFee>,
    #[serde(default)]
    pub shipper_drop_offs: Vec<ShipperDropOffFee>,
    #[serde(default)]
    pub through_rail_offers: Vec<ThroughRailOffer>,
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub sea_coc: usize,
    pub sea_soc: usize,
    pub rail: usize,
    pub carrier_drop_offs: usize,
    pub shipper_drop_offs: usize,
    pub through_rail_offers: usize,
}

impl RateCatalog {
    /// Parse a catalog from a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: RateCatalog = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Sea rates for one ownership mode, in table order.
    pub fn sea_rates(&self, ownership: Ownership) -> impl Iterator<Item = &SeaRouteRate> {
        self.sea_rates
            .iter()
            .filter(move |rate| rate.ownership == ownership)
    }

    /// Whether any shipper-owned drop-off rows were loaded.
    pub fn has_shipper_drop_offs(&self) -> bool {
        !self.shipper_drop_offs.is_empty()
    }

    /// Check every record can take part in matching.
    ///
    /// A record with an empty key set would silently never match, which
    /// almost always means the ingestion step misread a sheet.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |table, index, reason| CatalogError::InvalidRecord {
            table,
            index,
            reason,
        };

        for (index, rate) in self.sea_rates.iter().enumerate() {
            if rate.origin_ports.is_empty() {
                return Err(invalid("sea", index, "no origin ports"));
            }
            if rate.destination_ports.is_empty() {
                return Err(invalid("sea", index, "no destination ports"));
            }
            if rate.carriers.is_empty() {
                return Err(invalid("sea", index, "no carriers"));
            }
        }

        for (index, rate) in self.rail_rates.iter().enumerate() {
            if rate.departure_stations.is_empty() {
                return Err(invalid("rail", index, "no departure stations"));
            }
            if rate.arrival_city.trim().is_empty() {
                return Err(invalid("rail", index, "no arrival city"));
            }
        }

        for (index, fee) in self.carrier_drop_offs.iter().enumerate() {
            if fee.carrier.trim().is_empty() {
                return Err(invalid("carrier drop-off", index, "no carrier"));
            }
            if fee.cities.is_empty() {
                return Err(invalid("carrier drop-off", index, "no cities"));
            }
        }

        Ok(())
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            sea_coc: self.sea_rates(Ownership::Coc).count(),
            sea_soc: self.sea_rates(Ownership::Soc).count(),
            rail: self.rail_rates.len(),
            carrier_drop_offs: self.carrier_drop_offs.len(),
            shipper_drop_offs: self.shipper_drop_offs.len(),
            through_rail_offers: self.through_rail_offers.len(),
        }
    }
}
