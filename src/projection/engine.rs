//! Core forecast engine for the yearly revenue waterfall

use super::revenue::{ForecastResult, YearRecord};
use super::state::WaterfallState;
use crate::error::ForecastError;
use crate::params::{ForecastParameters, MAX_FORECAST_YEARS};

/// Main forecast engine
///
/// Holds one immutable parameter set. Every call to [`ForecastEngine::project`]
/// starts again from the base year, so results never depend on earlier runs.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    params: ForecastParameters,
}

impl ForecastEngine {
    /// Create a new forecast engine for a parameter set
    pub fn new(params: ForecastParameters) -> Self {
        Self { params }
    }

    /// Run the waterfall from `forecast_start` to `forecast_end` inclusive.
    ///
    /// An inverted range gives an empty result. If the active project count
    /// overflows, the error is logged and the years before it are returned;
    /// use [`ForecastEngine::project_checked`] to get the fault instead.
    pub fn project(&self) -> ForecastResult {
        let mut result = self.new_result();
        if let Err(e) = self.run_waterfall(&mut result) {
            log::error!("forecast stopped early: {}", e);
        }
        result
    }

    /// Same as [`ForecastEngine::project`], but fails on project count
    /// overflow or on the first non-finite figure
    pub fn project_checked(&self) -> Result<ForecastResult, ForecastError> {
        let mut result = self.new_result();
        self.run_waterfall(&mut result)?;
        check_finite(&result)?;
        Ok(result)
    }

    fn new_result(&self) -> ForecastResult {
        ForecastResult::with_capacity(self.params.forecast_years().min(MAX_FORECAST_YEARS))
    }

    fn run_waterfall(&self, result: &mut ForecastResult) -> Result<(), ForecastError> {
        let params = &self.params;
        let mut state = WaterfallState::from_params(params);

        for year in params.forecast_start..=params.forecast_end {
            state.advance_year(year, params)?;
            result.add_record(self.calculate_year(&state));
        }

        log::debug!(
            "forecast {}..={} produced {} records",
            params.forecast_start,
            params.forecast_end,
            result.len()
        );
        Ok(())
    }

    /// Calculate revenue for the year the state was just advanced to
    fn calculate_year(&self, state: &WaterfallState) -> YearRecord {
        let params = &self.params;
        let active = state.active_projects as f64;

        let service_contract_revenue = active * params.avg_service_contract;

        let effective_spare_parts_rate = self.spare_parts_rate(state.year);
        let spare_parts_revenue = active * effective_spare_parts_rate;

        let other_service_revenue = active * params.avg_other_service;

        let total_revenue = service_contract_revenue + spare_parts_revenue + other_service_revenue;

        YearRecord {
            year: state.year,
            active_projects: state.active_projects,
            effective_spare_parts_rate,
            service_contract_revenue,
            spare_parts_revenue,
            other_service_revenue,
            total_revenue,
        }
    }

    /// Spare parts spend per project in `year`, compounded from the base year.
    /// Years before the base year discount rather than grow.
    pub fn spare_parts_rate(&self, year: i32) -> f64 {
        let params = &self.params;
        let exponent = (i64::from(year) - i64::from(params.base_year)) as f64;
        params.avg_spare_parts * (1.0 + params.spare_parts_growth_rate).powf(exponent)
    }
}

/// Forecast a parameter set in one call
pub fn compute(params: &ForecastParameters) -> ForecastResult {
    ForecastEngine::new(params.clone()).project()
}

/// Report the first non-finite monetary value in a result
fn check_finite(result: &ForecastResult) -> Result<(), ForecastError> {
    for record in &result.records {
        if let Some((field, _)) = record.monetary_fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ForecastError::NonFinite {
                year: record.year,
                field,
            });
        }
    }
    Ok(())
}
