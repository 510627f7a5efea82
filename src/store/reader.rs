//! Read-only access to the observations store
//!
//! `ClimateStore` owns the connection pool and is shared by all requests.
//! Each request opens a `StoreSession`, which holds one pooled connection
//! for every query the request issues and hands it back to the pool when
//! dropped, on success and error paths alike.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite};

use super::errors::{StoreError, StoreResult};
use super::reference_date::ReferenceDateCache;
use super::schema::{Measurement, Station, TableDef, TABLES};
use crate::analysis::{parse_date, YearWindow, DATE_FORMAT};

/// Observation count of one station
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StationCount {
    pub station: String,
    pub count: i64,
}

/// Minimum, average and maximum temperature observation.
///
/// All three are `None` when no row matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow, Serialize)]
pub struct TemperatureStats {
    pub min_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

/// Row selection for temperature aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TobsFilter<'a> {
    /// Every observation of one station
    Station(&'a str),
    /// Observations on or after a date
    Since(NaiveDate),
    /// Observations between two dates, both inclusive
    Between(NaiveDate, NaiveDate),
}

/// Extent of the measurement table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct DateSpan {
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Shared handle on the observations store
#[derive(Debug)]
pub struct ClimateStore {
    pool: SqlitePool,
    path: PathBuf,
    reference: ReferenceDateCache,
}

impl ClimateStore {
    /// Open the store read-only and verify its schema.
    ///
    /// Fails if the file does not exist or a declared table or column is
    /// missing; nothing is created.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|source| StoreError::Open {
                path: path.clone(),
                source,
            })?;

        let store = Self {
            pool,
            path,
            reference: ReferenceDateCache::new(),
        };
        store.verify_schema().await?;

        tracing::info!(path = %store.path.display(), "observations store opened");
        Ok(store)
    }

    async fn verify_schema(&self) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        for table in TABLES {
            let columns: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                    .bind(table.name)
                    .fetch_all(&mut *conn)
                    .await?;
            check_columns(&table, &columns)?;
        }
        Ok(())
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Window cache shared by all sessions
    pub fn reference_cache(&self) -> &ReferenceDateCache {
        &self.reference
    }

    /// Acquire a connection for the duration of one request
    pub async fn session(&self) -> StoreResult<StoreSession<'_>> {
        let conn = self.pool.acquire().await?;
        Ok(StoreSession {
            conn,
            reference: &self.reference,
        })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn check_columns(table: &TableDef, present: &[String]) -> StoreResult<()> {
    if present.is_empty() {
        return Err(StoreError::MissingTable(table.name.to_string()));
    }
    for column in table.columns {
        if !present.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            return Err(StoreError::MissingColumn {
                table: table.name.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// One request's view of the store
pub struct StoreSession<'a> {
    conn: PoolConnection<Sqlite>,
    reference: &'a ReferenceDateCache,
}

impl StoreSession<'_> {
    /// Latest measurement date, `None` for an empty table
    pub async fn latest_date(&mut self) -> StoreResult<Option<NaiveDate>> {
        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;

        latest
            .map(|s| parse_date(&s).ok_or(StoreError::InvalidDate(s)))
            .transpose()
    }

    /// Trailing year window anchored on the current latest date
    pub async fn year_window(&mut self) -> StoreResult<Option<YearWindow>> {
        let latest = self.latest_date().await?;
        Ok(latest.map(|reference| self.reference.window_for(reference)))
    }

    /// Number of distinct station identifiers
    pub async fn station_count(&mut self) -> StoreResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(DISTINCT station) FROM station")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// All stations, ordered by identifier
    pub async fn stations(&mut self) -> StoreResult<Vec<Station>> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY station",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(stations)
    }

    /// Measurement rows per station, most active first.
    ///
    /// Equal counts are ordered by station identifier.
    pub async fn observation_counts(&mut self) -> StoreResult<Vec<StationCount>> {
        let counts = sqlx::query_as::<_, StationCount>(
            "SELECT station, COUNT(*) AS count FROM measurement \
             GROUP BY station ORDER BY count DESC, station ASC",
        )
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(counts)
    }

    /// Measurements dated on or after the window start, in table order.
    ///
    /// Restricted to one station when `station` is given.
    pub async fn measurements_in(
        &mut self,
        window: &YearWindow,
        station: Option<&str>,
    ) -> StoreResult<Vec<Measurement>> {
        let start = window.start_bound();
        let rows = match station {
            Some(station) => {
                sqlx::query_as::<_, Measurement>(
                    "SELECT station, date, prcp, tobs FROM measurement \
                     WHERE station = ? AND date >= ?",
                )
                .bind(station)
                .bind(start)
                .fetch_all(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, Measurement>(
                    "SELECT station, date, prcp, tobs FROM measurement WHERE date >= ?",
                )
                .bind(start)
                .fetch_all(&mut *self.conn)
                .await?
            }
        };
        Ok(rows)
    }

    /// Min, average and max temperature over the selected rows
    pub async fn temperature_stats(&mut self, filter: TobsFilter<'_>) -> StoreResult<TemperatureStats> {
        const SELECT: &str =
            "SELECT MIN(tobs) AS min_temp, AVG(tobs) AS avg_temp, MAX(tobs) AS max_temp FROM measurement";

        let stats = match filter {
            TobsFilter::Station(station) => {
                let sql = format!("{} WHERE station = ?", SELECT);
                sqlx::query_as::<_, TemperatureStats>(&sql)
                    .bind(station)
                    .fetch_one(&mut *self.conn)
                    .await?
            }
            TobsFilter::Since(start) => {
                let sql = format!("{} WHERE date >= ?", SELECT);
                sqlx::query_as::<_, TemperatureStats>(&sql)
                    .bind(start.format(DATE_FORMAT).to_string())
                    .fetch_one(&mut *self.conn)
                    .await?
            }
            TobsFilter::Between(start, end) => {
                let sql = format!("{} WHERE date >= ? AND date <= ?", SELECT);
                sqlx::query_as::<_, TemperatureStats>(&sql)
                    .bind(start.format(DATE_FORMAT).to_string())
                    .bind(end.format(DATE_FORMAT).to_string())
                    .fetch_one(&mut *self.conn)
                    .await?
            }
        };
        Ok(stats)
    }

    /// Row count and date extent of the measurement table
    pub async fn date_span(&mut self) -> StoreResult<DateSpan> {
        let span = sqlx::query_as::<_, DateSpan>(
            "SELECT COUNT(*) AS measurement_count, MIN(date) AS first_date, \
             MAX(date) AS last_date FROM measurement",
        )
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(span)
    }
}
