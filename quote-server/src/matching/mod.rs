//! Fuzzy matching primitives for place names.
//!
//! Rate tables are maintained independently and spell ports, cities and
//! stations inconsistently. These helpers decide when two spellings mean the
//! same place, whether a port is a rail hub, and whether a rail station can
//! serve a port.

mod hubs;
mod names;
mod stations;

pub use hubs::{HubFamily, classify_hub, further_rail_required};
pub use names::{NormalizedName, contains_ci, normalize, same_place};
pub use stations::{area_station_keywords, arrival_serves_city, is_compatible};
