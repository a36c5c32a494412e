//! Quote composition.
//!
//! A [`QuoteRequest`] is resolved against a [`RateCatalog`](crate::catalog::RateCatalog)
//! into a [`Quote`]: a priced sea (+ rail) route, a through-rail offer, or
//! diagnostics only.

mod composer;
mod config;
mod model;
mod query;
mod service;

pub use composer::resolve;
pub(crate) use composer::{Composition, RailPlan, compose_route};
pub use config::QuoteConfig;
pub use model::{
    DiagnosticQuote, DropOffQuote, PricingStatus, Quote, RailLegQuote, SeaLegQuote, SeaRailQuote,
    ThroughRailQuote,
};
pub use query::{QuoteRequest, RouteQuery, ThroughRailQuery};
pub use service::QuoteService;

#[cfg(test)]
pub(crate) use composer::fixtures;
