//! Rate table resolvers.
//!
//! Each resolver looks up one leg of a route against the catalog. Resolvers
//! are pure functions of their inputs and never fail: an unpriced leg comes
//! back as a [`LegFailure`] value for the composer to record.

mod commentary;
mod drop_off;
mod rail;
mod sea;
mod through_rail;

pub use commentary::{Commentary, FailureCause, LegFailure, LegKind};
pub use drop_off::{
    CarrierDropOffRequest, DropOffResolution, ShipperDropOffRequest, carrier_drop_off_triggered,
    is_exempt_carrier, resolve_carrier_drop_off, resolve_shipper_drop_off,
};
pub use rail::{
    MissingComponent, RailLegRequest, RailLegResolution, RailRoute, resolve_rail_leg,
    resolve_rail_routes,
};
pub use sea::{SeaLegRequest, SeaLegResolution, resolve_sea_leg, sea_carriers, sea_destinations};
pub use through_rail::resolve_through_rail;
