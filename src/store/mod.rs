//! # Observations Store
//!
//! Read-only access to the SQLite database of stations and daily
//! measurements.
//!
//! - `schema`: declared tables and typed records
//! - `reader`: pooled store handle and per-request sessions
//! - `reference_date`: trailing-year window cache keyed by the latest date
//! - `errors`: store error types

pub mod errors;
pub mod reader;
pub mod reference_date;
pub mod schema;

pub use errors::{StoreError, StoreResult};
pub use reader::{ClimateStore, DateSpan, StationCount, StoreSession, TemperatureStats, TobsFilter};
pub use reference_date::{CacheStats, ReferenceDateCache};
pub use schema::{Measurement, Station, TableDef, MEASUREMENT_TABLE, STATION_TABLE, TABLES};
