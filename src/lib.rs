//! Revenue Forecast - annual revenue waterfall for a project portfolio
//!
//! This library provides:
//! - Forecast parameters with defaults, CSV overrides and validation
//! - The yearly waterfall engine (active projects, three revenue components)
//! - Summary statistics for a forecast
//! - Table, chart, CSV and JSON rendering of the result

pub mod error;
pub mod params;
pub mod projection;
pub mod report;

// Re-export commonly used types
pub use error::{ForecastError, ParameterError};
pub use params::ForecastParameters;
pub use projection::{compute, ForecastEngine, ForecastResult, ForecastSummary, YearRecord};
pub use report::ForecastReport;
