//! Rate table records.
//!
//! Each record type mirrors one sheet of the ingested rate workbook. Records
//! are never mutated after ingestion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ContainerType, FeeAmount, Money, Ownership};

/// An ocean freight rate shared by every origin × destination × carrier
/// combination it lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeaRouteRate {
    pub origin_ports: Vec<String>,
    pub destination_ports: Vec<String>,
    pub carriers: Vec<String>,
    /// Tabulated price per container type; a `null` cell is an unpriced route.
    #[serde(default)]
    pub price_by_container: BTreeMap<ContainerType, Option<Money>>,
    #[serde(default)]
    pub comment: Option<String>,
    pub ownership: Ownership,
}

impl SeaRouteRate {
    /// Price for a container type, if tabulated.
    pub fn price_for(&self, container: ContainerType) -> Option<Money> {
        self.price_by_container.get(&container).copied().flatten()
    }
}

/// An inland rail corridor, listed under all its station aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailLegRate {
    pub departure_stations: Vec<String>,
    pub arrival_stations: Vec<String>,
    pub arrival_city: String,
    #[serde(default)]
    pub price20_lt24t: Option<Money>,
    #[serde(default)]
    pub price20_lt28t: Option<Money>,
    #[serde(default)]
    pub guard_fee20: Option<Money>,
    #[serde(default)]
    pub price40: Option<Money>,
    #[serde(default)]
    pub guard_fee40: Option<Money>,
}

/// Drop-off fee charged by a carrier for returning its container in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierDropOffFee {
    pub carrier: String,
    pub cities: Vec<String>,
    #[serde(default)]
    pub price20: Option<FeeAmount>,
    #[serde(default)]
    pub price40: Option<FeeAmount>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl CarrierDropOffFee {
    pub fn fee_for(&self, container: ContainerType) -> Option<FeeAmount> {
        if container.is_twenty_foot() {
            self.price20
        } else {
            self.price40
        }
    }
}

/// Repositioning fee for a shipper-owned container, one row per container type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipperDropOffFee {
    pub departure_city: String,
    pub drop_off_city: String,
    pub container_type: ContainerType,
    #[serde(default)]
    pub price: Option<Money>,
}

/// A fully priced rail-only route offered by a forwarding agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughRailOffer {
    pub agent: String,
    pub departure_city: String,
    pub departure_station: String,
    pub border: String,
    pub destination_city: String,
    pub incoterms: String,
    pub price: Money,
    /// Estimated departure, as written in the sheet (e.g. "weekly, Fri").
    #[serde(default)]
    pub etd: String,
    #[serde(default)]
    pub commentary: Option<String>,
}
