//! Web layer for the quotation engine.
//!
//! Provides JSON endpoints for quoting, best-price search and catalog
//! replacement.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppAdvisor, AppState};
