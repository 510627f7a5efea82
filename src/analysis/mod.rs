//! Pure computations over query results
//!
//! - `window`: trailing twelve-month window anchored on the reference date
//! - `describe`: summary statistics over a numeric column

pub mod describe;
pub mod window;

pub use describe::{ColumnSummary, Describe};
pub use window::{parse_date, YearWindow, DATE_FORMAT};
