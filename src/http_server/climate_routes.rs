//! Climate HTTP Routes
//!
//! Read-only endpoints over the observations store. Every handler opens one
//! store session, runs its queries on it and reshapes the rows into a JSON
//! body. The session's connection returns to the pool when the handler
//! exits, whichever way it exits.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use super::errors::{ApiError, ApiResult};
use super::response::{
    ObservationCounts, PrecipitationRecord, PrecipitationResponse, RangeStatsResponse,
    StartStatsResponse, StationsResponse, TobsRecord, TobsResponse,
};
use crate::analysis::{parse_date, Describe, DATE_FORMAT};
use crate::store::{ClimateStore, TemperatureStats, TobsFilter};

/// Route listing served at `/`
pub const HOME_PAGE: &str = "Welcome to the Climate App API!<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;";

/// Create climate routes
pub fn climate_routes(store: Arc<ClimateStore>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_stats_handler))
        .route("/api/v1.0/:start/:end", get(range_stats_handler))
        .with_state(store)
}

fn date_param(param: &'static str, value: &str) -> ApiResult<NaiveDate> {
    parse_date(value).ok_or_else(|| ApiError::InvalidDate {
        param,
        value: value.to_string(),
    })
}

async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Last year of precipitation, sorted by date, with summary statistics
async fn precipitation_handler(
    State(store): State<Arc<ClimateStore>>,
) -> ApiResult<Json<PrecipitationResponse>> {
    let mut session = store.session().await?;

    let mut rows = match session.year_window().await? {
        Some(window) => session.measurements_in(&window, None).await?,
        None => Vec::new(),
    };
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    let summary = Describe::of(rows.iter().map(|m| m.prcp)).for_column("precipitation");
    tracing::debug!(rows = rows.len(), "precipitation window loaded");

    Ok(Json(PrecipitationResponse {
        precipitation_data: rows.into_iter().map(PrecipitationRecord::from).collect(),
        summary_statistics: summary,
    }))
}

/// Station counts and the most active station's temperatures
async fn stations_handler(
    State(store): State<Arc<ClimateStore>>,
) -> ApiResult<Json<StationsResponse>> {
    let mut session = store.session().await?;

    let station_count = session.station_count().await?;
    let counts = session.observation_counts().await?;
    let most_active = counts.first().map(|c| c.station.clone());

    let (stats, tobs) = match most_active.as_deref() {
        Some(station) => {
            let stats = session.temperature_stats(TobsFilter::Station(station)).await?;
            let tobs = match session.year_window().await? {
                Some(window) => session.measurements_in(&window, Some(station)).await?,
                None => Vec::new(),
            };
            (stats, tobs)
        }
        None => (TemperatureStats::default(), Vec::new()),
    };

    Ok(Json(StationsResponse {
        station_count,
        station_observation_counts: ObservationCounts(counts),
        most_active_station: most_active,
        most_active_station_stats: stats,
        most_active_station_tobs: tobs.into_iter().map(TobsRecord::from).collect(),
    }))
}

/// Last year of temperature observations across all stations
async fn tobs_handler(State(store): State<Arc<ClimateStore>>) -> ApiResult<Json<TobsResponse>> {
    let mut session = store.session().await?;

    let rows = match session.year_window().await? {
        Some(window) => session.measurements_in(&window, None).await?,
        None => Vec::new(),
    };

    Ok(Json(TobsResponse {
        temperature_observations: rows.into_iter().map(TobsRecord::from).collect(),
    }))
}

/// Temperature aggregates from a start date to the end of the data
async fn start_stats_handler(
    State(store): State<Arc<ClimateStore>>,
    Path(start): Path<String>,
) -> ApiResult<Json<StartStatsResponse>> {
    let start = date_param("start", &start)?;

    let mut session = store.session().await?;
    let stats = session.temperature_stats(TobsFilter::Since(start)).await?;

    Ok(Json(StartStatsResponse {
        start_date: start.format(DATE_FORMAT).to_string(),
        temperature_stats: stats,
    }))
}

/// Temperature aggregates between two dates, both inclusive
async fn range_stats_handler(
    State(store): State<Arc<ClimateStore>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Json<RangeStatsResponse>> {
    let start = date_param("start", &start)?;
    let end = date_param("end", &end)?;

    let mut session = store.session().await?;
    let stats = session
        .temperature_stats(TobsFilter::Between(start, end))
        .await?;

    Ok(Json(RangeStatsResponse {
        start_date: start.format(DATE_FORMAT).to_string(),
        end_date: end.format(DATE_FORMAT).to_string(),
        temperature_stats: stats,
    }))
}
