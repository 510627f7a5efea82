//! Declared schema of the observations store
//!
//! The store holds exactly two tables. Their shape is fixed and known in
//! advance, so it is declared here and verified once at startup instead of
//! being discovered at runtime.

use serde::Serialize;
use sqlx::FromRow;

/// A table the store must contain, with the columns the queries rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Station metadata table
pub const STATION_TABLE: TableDef = TableDef {
    name: "station",
    columns: &["station", "name", "latitude", "longitude", "elevation"],
};

/// Daily measurement table
pub const MEASUREMENT_TABLE: TableDef = TableDef {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

/// All tables in the store
pub const TABLES: [TableDef; 2] = [STATION_TABLE, MEASUREMENT_TABLE];

/// A fixed weather observation site
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One day's observations for a station.
///
/// Dates are stored as `YYYY-MM-DD` text, which sorts and compares the
/// same way the calendar dates do.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}
