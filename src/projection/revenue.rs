//! Revenue output structures for forecasts

use serde::{Deserialize, Serialize};

/// A single row of forecast output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub active_projects: i64,

    // Spare parts spend per project after growth
    pub effective_spare_parts_rate: f64,

    // Revenue components (per-project rate * active projects)
    pub service_contract_revenue: f64,
    pub spare_parts_revenue: f64,
    pub other_service_revenue: f64,

    pub total_revenue: f64,
}

impl YearRecord {
    /// Named monetary fields, in column order
    pub fn monetary_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("effective_spare_parts_rate", self.effective_spare_parts_rate),
            ("service_contract_revenue", self.service_contract_revenue),
            ("spare_parts_revenue", self.spare_parts_revenue),
            ("other_service_revenue", self.other_service_revenue),
            ("total_revenue", self.total_revenue),
        ]
    }
}

/// Complete forecast result, one record per year in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub records: Vec<YearRecord>,
}

impl ForecastResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(years: usize) -> Self {
        Self {
            records: Vec::with_capacity(years),
        }
    }

    /// Add a year record
    pub fn add_record(&mut self, record: YearRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for a specific forecast year
    pub fn year(&self, year: i32) -> Option<&YearRecord> {
        self.records.iter().find(|r| r.year == year)
    }

    /// True if any year ends with fewer than zero active projects
    pub fn has_negative_projects(&self) -> bool {
        self.records.iter().any(|r| r.active_projects < 0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ForecastSummary {
        let total_service_revenue: f64 = self.records.iter().map(|r| r.service_contract_revenue).sum();
        let total_spare_parts_revenue: f64 = self.records.iter().map(|r| r.spare_parts_revenue).sum();
        let total_other_service_revenue: f64 = self.records.iter().map(|r| r.other_service_revenue).sum();
        let total_revenue: f64 = self.records.iter().map(|r| r.total_revenue).sum();

        let first_year_revenue = self.records.first().map(|r| r.total_revenue).unwrap_or(0.0);
        let final_year_revenue = self.records.last().map(|r| r.total_revenue).unwrap_or(0.0);
        let final_active_projects = self.records.last().map(|r| r.active_projects);

        ForecastSummary {
            years: self.records.len() as u32,
            total_service_revenue,
            total_spare_parts_revenue,
            total_other_service_revenue,
            total_revenue,
            first_year_revenue,
            final_year_revenue,
            final_active_projects,
            revenue_cagr: compound_growth_rate(first_year_revenue, final_year_revenue, self.records.len()),
        }
    }
}

/// Annualized growth between the first and last of `years` values.
///
/// Undefined for fewer than two years or non-positive endpoints.
pub fn compound_growth_rate(first: f64, last: f64, years: usize) -> Option<f64> {
    if years < 2 || first <= 0.0 || last <= 0.0 {
        return None;
    }
    let periods = (years - 1) as f64;
    Some((last / first).powf(1.0 / periods) - 1.0)
}

/// Summary statistics for a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub years: u32,
    pub total_service_revenue: f64,
    pub total_spare_parts_revenue: f64,
    pub total_other_service_revenue: f64,
    pub total_revenue: f64,
    pub first_year_revenue: f64,
    pub final_year_revenue: f64,
    pub final_active_projects: Option<i64>,
    pub revenue_cagr: Option<f64>,
}
