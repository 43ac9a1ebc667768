//! Forecast engine for the yearly revenue waterfall

mod state;
mod engine;
mod revenue;

pub use engine::{ForecastEngine, compute};
pub use revenue::{YearRecord, ForecastResult, ForecastSummary, compound_growth_rate};
