//! # Climate API HTTP Server Module
//!
//! Combines the endpoint routers into a single Axum server.
//!
//! # Endpoints
//!
//! - `/` - Route listing
//! - `/api/v1.0/precipitation` - Last year of precipitation with summary statistics
//! - `/api/v1.0/stations` - Station counts and most active station temperatures
//! - `/api/v1.0/tobs` - Last year of temperature observations
//! - `/api/v1.0/<start>` and `/api/v1.0/<start>/<end>` - Temperature aggregates
//! - `/health` - Health check

pub mod climate_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
