//! Rate tables and the catalog that holds them.
//!
//! The ingestion collaborator produces the tables as one JSON document. The
//! catalog is read-only once built; a new upload replaces it wholesale.

mod error;
mod rates;
mod store;
mod tables;

pub use error::CatalogError;
pub use rates::{CatalogSummary, RateCatalog};
pub use store::{CatalogSnapshot, CatalogStore};
pub use tables::{
    CarrierDropOffFee, RailLegRate, SeaRouteRate, ShipperDropOffFee, ThroughRailOffer,
};
