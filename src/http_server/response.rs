//! # Response Bodies
//!
//! JSON shapes returned by the climate routes.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::analysis::ColumnSummary;
use crate::store::{Measurement, StationCount, TemperatureStats};

/// One day's precipitation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationRecord {
    pub date: String,
    pub precipitation: Option<f64>,
}

impl From<Measurement> for PrecipitationRecord {
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            precipitation: m.prcp,
        }
    }
}

/// One temperature observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsRecord {
    pub date: String,
    pub tobs: f64,
}

impl From<Measurement> for TobsRecord {
    fn from(m: Measurement) -> Self {
        Self {
            date: m.date,
            tobs: m.tobs,
        }
    }
}

/// `GET /api/v1.0/precipitation`
#[derive(Debug, Serialize)]
pub struct PrecipitationResponse {
    pub precipitation_data: Vec<PrecipitationRecord>,
    pub summary_statistics: ColumnSummary,
}

/// Observation counts serialized as a `station -> count` object, most
/// active station first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObservationCounts(pub Vec<StationCount>);

impl Serialize for ObservationCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.station, &entry.count)?;
        }
        map.end()
    }
}

/// `GET /api/v1.0/stations`
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub station_count: i64,
    pub station_observation_counts: ObservationCounts,
    pub most_active_station: Option<String>,
    pub most_active_station_stats: TemperatureStats,
    pub most_active_station_tobs: Vec<TobsRecord>,
}

/// `GET /api/v1.0/tobs`
#[derive(Debug, Serialize)]
pub struct TobsResponse {
    pub temperature_observations: Vec<TobsRecord>,
}

/// `GET /api/v1.0/<start>`
#[derive(Debug, Serialize)]
pub struct StartStatsResponse {
    pub start_date: String,
    pub temperature_stats: TemperatureStats,
}

/// `GET /api/v1.0/<start>/<end>`
#[derive(Debug, Serialize)]
pub struct RangeStatsResponse {
    pub start_date: String,
    pub end_date: String,
    pub temperature_stats: TemperatureStats,
}
