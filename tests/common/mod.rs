//! Shared fixtures for the integration tests
//!
//! Builds a throwaway SQLite file with the station/measurement layout,
//! seeds it through a separate writable pool and opens it through the
//! read-only store the server uses.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

use climate_api::http_server::{HttpServer, HttpServerConfig};
use climate_api::store::ClimateStore;

pub const STATION_DDL: &str = "CREATE TABLE station (
    id INTEGER PRIMARY KEY,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
)";

pub const MEASUREMENT_DDL: &str = "CREATE TABLE measurement (
    id INTEGER PRIMARY KEY,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
)";

/// Temporary observations database
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
    writer: SqlitePool,
}

impl Fixture {
    /// Empty database with both tables
    pub async fn empty() -> Self {
        let fixture = Self::blank().await;
        fixture.execute(STATION_DDL).await;
        fixture.execute(MEASUREMENT_DDL).await;
        fixture
    }

    /// Database file with no tables at all
    pub async fn blank() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("climate.sqlite");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        Self {
            _dir: dir,
            path,
            writer,
        }
    }

    /// Small Hawaii-like dataset.
    ///
    /// Latest date 2017-08-23. USC00519281 is the most active station,
    /// USC00517948 has no measurements, and rows are inserted out of date
    /// order.
    pub async fn hawaii() -> Self {
        let fixture = Self::empty().await;
        fixture.station("USC00519397", "WAIKIKI 717.2, HI US").await;
        fixture.station("USC00519281", "WAIHEE 837.5, HI US").await;
        fixture.station("USC00513117", "KANEOHE 838.1, HI US").await;
        fixture.station("USC00517948", "PEARL CITY, HI US").await;

        fixture.measurement("USC00519397", "2017-08-23", Some(0.25), 82.0).await;
        fixture.measurement("USC00519281", "2016-08-22", Some(0.1), 70.0).await;
        fixture.measurement("USC00519281", "2016-08-23", Some(0.5), 72.0).await;
        fixture.measurement("USC00519281", "2017-01-01", None, 65.0).await;
        fixture.measurement("USC00519281", "2017-08-23", Some(0.0), 80.0).await;
        fixture.measurement("USC00519397", "2016-08-23", Some(0.0), 81.0).await;
        fixture.measurement("USC00513117", "2015-01-01", Some(1.0), 60.0).await;
        fixture
    }

    pub async fn execute(&self, sql: &str) {
        sqlx::query(sql).execute(&self.writer).await.unwrap();
    }

    pub async fn station(&self, id: &str, name: &str) {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?, ?, 21.3, -157.8, 3.0)",
        )
        .bind(id)
        .bind(name)
        .execute(&self.writer)
        .await
        .unwrap();
    }

    pub async fn measurement(&self, station: &str, date: &str, prcp: Option<f64>, tobs: f64) {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&self.writer)
            .await
            .unwrap();
    }

    /// Open the database the way the server does, with a single connection
    /// so a leaked session would stall the next request.
    pub async fn store(&self) -> Arc<ClimateStore> {
        Arc::new(ClimateStore::open(&self.path, 1).await.unwrap())
    }

    /// Full application router over this database
    pub async fn router(&self) -> (Router, Arc<ClimateStore>) {
        let store = self.store().await;
        let router = HttpServer::new(HttpServerConfig::default(), Arc::clone(&store)).router();
        (router, store)
    }
}

/// Issue a GET and return status and raw body
pub async fn get_raw(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

/// Issue a GET and parse the body as JSON
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_raw(router, uri).await;
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|v| (v - expected).abs() < 1e-9)
        .unwrap_or(false)
}

pub fn dates(records: &Value) -> Vec<String> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap().to_string())
        .collect()
}
