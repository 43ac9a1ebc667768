//! Output rendering: table, charts, CSV and JSON report

pub mod chart;
pub mod table;

pub use chart::{
    breakdown_series, render_line_chart, render_stacked_chart, total_revenue_series, LineSeries,
    StackedPoint, StackedSeries, DEFAULT_CHART_WIDTH,
};
pub use table::{render_table, write_csv, write_csv_path, COLUMNS};

use crate::params::ForecastParameters;
use crate::projection::{ForecastResult, ForecastSummary, YearRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a renderer needs from one forecast run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub generated_at: DateTime<Utc>,
    pub parameters: ForecastParameters,
    pub summary: ForecastSummary,
    pub records: Vec<YearRecord>,
    pub total_revenue_chart: LineSeries,
    pub breakdown_chart: StackedSeries,
}

impl ForecastReport {
    pub fn new(parameters: ForecastParameters, result: ForecastResult) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: result.summary(),
            total_revenue_chart: total_revenue_series(&result),
            breakdown_chart: breakdown_series(&result),
            records: result.records,
            parameters,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::compute;

    #[test]
    fn test_report_json_fields() {
        let params = ForecastParameters::default();
        let report = ForecastReport::new(params.clone(), compute(&params));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["records"].as_array().unwrap().len(), 6);
        assert_eq!(value["records"][0]["year"], 2025);
        assert_eq!(value["records"][0]["active_projects"], 28);
        assert_eq!(value["parameters"]["base_year"], 2024);
        assert_eq!(value["summary"]["years"], 6);
        assert_eq!(value["total_revenue_chart"]["title"], "Total Revenue Forecast");
        assert_eq!(value["breakdown_chart"]["points"][5]["year"], 2030);
        assert!(value["generated_at"].is_string());
    }
}
