//! climate-api - A read-only JSON API over a climate observations database
//!
//! The store holds weather stations and their daily precipitation and
//! temperature measurements. The HTTP layer answers a fixed set of GET
//! routes with aggregates over the latest year of data or a requested
//! date range.

pub mod analysis;
pub mod cli;
pub mod http_server;
pub mod store;
