//! Freight quotation server.
//!
//! Prices container shipments against independently maintained rate tables:
//! ocean rates, inland rail rates, drop-off fees and through-rail offers.
//! A quote composes the legs a route needs and explains the ones it could
//! not price; best-price search ranks every feasible combination.

pub mod advisory;
pub mod best_price;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod matching;
pub mod quote;
pub mod resolve;
pub mod web;
