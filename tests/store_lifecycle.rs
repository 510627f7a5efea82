//! Store Lifecycle Tests
//!
//! - A missing or malformed store stops startup
//! - Sessions hand their connection back on every exit path
//! - The reference window follows the latest measurement date
//! - Repeated and concurrent requests agree byte for byte

mod common;

use axum::http::StatusCode;
use common::{dates, get_json, get_raw, Fixture, MEASUREMENT_DDL, STATION_DDL};

use climate_api::analysis::parse_date;
use climate_api::store::{ClimateStore, StoreError, TobsFilter};

// =============================================================================
// Startup
// =============================================================================

#[tokio::test]
async fn test_open_missing_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = ClimateStore::open(dir.path().join("absent.sqlite"), 1)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Open { .. }));
    assert!(!dir.path().join("absent.sqlite").exists());
}

#[tokio::test]
async fn test_open_missing_table_fails() {
    let fixture = Fixture::blank().await;
    fixture.execute(STATION_DDL).await;

    let err = ClimateStore::open(&fixture.path, 1).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingTable(ref t) if t == "measurement"));
}

#[tokio::test]
async fn test_open_missing_column_fails() {
    let fixture = Fixture::blank().await;
    fixture.execute(STATION_DDL).await;
    fixture
        .execute("CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT)")
        .await;

    let err = ClimateStore::open(&fixture.path, 1).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingColumn { ref column, .. } if column == "tobs"));
}

#[tokio::test]
async fn test_open_valid_store() {
    let fixture = Fixture::blank().await;
    fixture.execute(STATION_DDL).await;
    fixture.execute(MEASUREMENT_DDL).await;

    let store = ClimateStore::open(&fixture.path, 2).await.unwrap();
    assert_eq!(store.path(), fixture.path.as_path());
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_session_queries() {
    let fixture = Fixture::hawaii().await;
    let store = fixture.store().await;
    let mut session = store.session().await.unwrap();

    assert_eq!(session.latest_date().await.unwrap(), parse_date("2017-08-23"));
    assert_eq!(session.station_count().await.unwrap(), 4);

    let stations = session.stations().await.unwrap();
    assert_eq!(stations.len(), 4);
    assert_eq!(stations[0].station, "USC00513117");

    let span = session.date_span().await.unwrap();
    assert_eq!(span.measurement_count, 7);
    assert_eq!(span.first_date.as_deref(), Some("2015-01-01"));
    assert_eq!(span.last_date.as_deref(), Some("2017-08-23"));

    let stats = session
        .temperature_stats(TobsFilter::Station("USC00519397"))
        .await
        .unwrap();
    assert_eq!(stats.min_temp, Some(81.0));
    assert_eq!(stats.max_temp, Some(82.0));
}

/// A failing request must not keep its connection. The fixture store has a
/// single connection, so a leak would stall every later request.
#[tokio::test]
async fn test_connection_released_after_server_error() {
    let fixture = Fixture::hawaii().await;
    fixture.measurement("USC00519281", "2017/09/01", Some(0.0), 75.0).await;
    let (router, _store) = fixture.router().await;

    for _ in 0..3 {
        let (status, json) = get_json(&router, "/api/v1.0/tobs").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], 500);
    }

    let (status, _) = get_json(&router, "/api/v1.0/2016-01-01").await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Reference window
// =============================================================================

/// New data with a later date moves the window on the next request.
#[tokio::test]
async fn test_window_follows_latest_date() {
    let fixture = Fixture::hawaii().await;
    let (router, store) = fixture.router().await;

    let (_, json) = get_json(&router, "/api/v1.0/tobs").await;
    assert_eq!(json["temperature_observations"].as_array().unwrap().len(), 5);

    fixture.measurement("USC00519397", "2018-01-15", Some(0.0), 77.0).await;

    let (_, json) = get_json(&router, "/api/v1.0/tobs").await;
    let rows = dates(&json["temperature_observations"]);
    assert_eq!(rows, vec!["2017-08-23", "2017-08-23", "2018-01-15"]);

    let window = store.reference_cache().current().unwrap();
    assert_eq!(window.start, parse_date("2017-01-15").unwrap());
    assert_eq!(store.reference_cache().stats().misses, 2);

    // Other window routes agree with the moved window
    let (_, json) = get_json(&router, "/api/v1.0/precipitation").await;
    let rows = dates(&json["precipitation_data"]);
    assert!(rows.iter().all(|d| d.as_str() >= "2017-01-15"));
}

// =============================================================================
// Idempotence
// =============================================================================

#[tokio::test]
async fn test_repeated_requests_identical() {
    let fixture = Fixture::hawaii().await;
    let (router, _store) = fixture.router().await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-08-23/2017-08-23",
    ] {
        let first = get_raw(&router, uri).await;
        let second = get_raw(&router, uri).await;
        assert_eq!(first, second, "{}", uri);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_agree() {
    let fixture = Fixture::hawaii().await;
    let (router, _store) = fixture.router().await;
    let (_, expected_tobs) = get_raw(&router, "/api/v1.0/tobs").await;
    let (_, expected_stations) = get_raw(&router, "/api/v1.0/stations").await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let router = router.clone();
            let uri = if i % 2 == 0 {
                "/api/v1.0/tobs"
            } else {
                "/api/v1.0/stations"
            };
            tokio::spawn(async move { (uri, get_raw(&router, uri).await) })
        })
        .collect();

    for handle in handles {
        let (uri, (status, body)) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let expected = if uri.ends_with("tobs") {
            &expected_tobs
        } else {
            &expected_stations
        };
        assert_eq!(&body, expected);
    }
}

// =============================================================================
// CLI
// =============================================================================

#[tokio::test]
async fn test_inspect_valid_store() {
    use climate_api::cli::{inspect, Config};

    let fixture = Fixture::hawaii().await;
    let config = Config {
        database_path: fixture.path.clone(),
        ..Default::default()
    };
    assert!(inspect(config).await.is_ok());
}
