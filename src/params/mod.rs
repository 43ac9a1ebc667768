//! Forecast parameters: defaults, named overrides, and boundary validation

pub mod loader;

pub use loader::{load_parameters, load_parameters_from_reader, DEFAULT_PARAMETERS_PATH};

use crate::error::ParameterError;
use serde::{Deserialize, Serialize};

/// Upper bound of the spare parts growth slider
pub const MAX_SPARE_PARTS_GROWTH_RATE: f64 = 0.5;

/// Longest forecast span the input form accepts
pub const MAX_FORECAST_YEARS: usize = 500;

/// Immutable input to a forecast run
///
/// Built once per run from defaults, an optional parameter file, and
/// command-line or request overrides. The engine reads it and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParameters {
    /// Year the active project count refers to
    pub base_year: i32,

    /// First forecast year (inclusive)
    pub forecast_start: i32,

    /// Last forecast year (inclusive)
    pub forecast_end: i32,

    /// Active projects in the base year
    pub base_active_projects: i64,

    /// Average annual service contract price per project
    pub avg_service_contract: f64,

    /// Average annual spare parts purchase per project, at base year prices
    pub avg_spare_parts: f64,

    /// Average annual other service price per project
    pub avg_other_service: f64,

    /// Projects won each year
    pub new_projects_per_year: i64,

    /// Projects lost each year
    pub churn_projects_per_year: i64,

    /// Annual compounding rate on spare parts spend per project
    pub spare_parts_growth_rate: f64,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            base_year: 2024,
            forecast_start: 2025,
            forecast_end: 2030,
            base_active_projects: 25,
            avg_service_contract: 40_000.0,
            avg_spare_parts: 60_000.0,
            avg_other_service: 30_000.0,
            new_projects_per_year: 8,
            churn_projects_per_year: 5,
            spare_parts_growth_rate: 0.05,
        }
    }
}

/// Names accepted by [`ForecastParameters::set`], in display order
pub const PARAMETER_NAMES: [&str; 10] = [
    "base_year",
    "forecast_start",
    "forecast_end",
    "base_active_projects",
    "new_projects_per_year",
    "churn_projects_per_year",
    "avg_service_contract",
    "avg_spare_parts",
    "avg_other_service",
    "spare_parts_growth_rate",
];

impl ForecastParameters {
    /// Number of years the forecast will produce (zero for an inverted range)
    pub fn forecast_years(&self) -> usize {
        if self.forecast_end < self.forecast_start {
            0
        } else {
            (i64::from(self.forecast_end) - i64::from(self.forecast_start) + 1) as usize
        }
    }

    /// Override a single parameter by its snake_case name
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ParameterError> {
        let value = value.trim();
        match name.trim() {
            "base_year" => self.base_year = parse_value(name, value)?,
            "forecast_start" => self.forecast_start = parse_value(name, value)?,
            "forecast_end" => self.forecast_end = parse_value(name, value)?,
            "base_active_projects" => self.base_active_projects = parse_value(name, value)?,
            "new_projects_per_year" => self.new_projects_per_year = parse_value(name, value)?,
            "churn_projects_per_year" => self.churn_projects_per_year = parse_value(name, value)?,
            "avg_service_contract" => self.avg_service_contract = parse_value(name, value)?,
            "avg_spare_parts" => self.avg_spare_parts = parse_value(name, value)?,
            "avg_other_service" => self.avg_other_service = parse_value(name, value)?,
            "spare_parts_growth_rate" => self.spare_parts_growth_rate = parse_value(name, value)?,
            other => return Err(ParameterError::UnknownParameter(other.to_string())),
        }
        Ok(())
    }

    /// Current value of every parameter as `(name, display value)` pairs
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("base_year", self.base_year.to_string()),
            ("forecast_start", self.forecast_start.to_string()),
            ("forecast_end", self.forecast_end.to_string()),
            ("base_active_projects", self.base_active_projects.to_string()),
            ("new_projects_per_year", self.new_projects_per_year.to_string()),
            ("churn_projects_per_year", self.churn_projects_per_year.to_string()),
            ("avg_service_contract", format!("{:.2}", self.avg_service_contract)),
            ("avg_spare_parts", format!("{:.2}", self.avg_spare_parts)),
            ("avg_other_service", format!("{:.2}", self.avg_other_service)),
            ("spare_parts_growth_rate", format!("{:.2}", self.spare_parts_growth_rate)),
        ]
    }

    /// Check the inputs the way the parameter form constrains them.
    ///
    /// An inverted year range is accepted here: it yields an empty forecast.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_price("avg_service_contract", self.avg_service_contract)?;
        check_price("avg_spare_parts", self.avg_spare_parts)?;
        check_price("avg_other_service", self.avg_other_service)?;

        let rate = self.spare_parts_growth_rate;
        if !rate.is_finite() || !(0.0..=MAX_SPARE_PARTS_GROWTH_RATE).contains(&rate) {
            return Err(ParameterError::InvalidValue {
                name: "spare_parts_growth_rate",
                reason: format!("{} is outside [0.0, {}]", rate, MAX_SPARE_PARTS_GROWTH_RATE),
            });
        }

        check_count("new_projects_per_year", self.new_projects_per_year)?;
        check_count("churn_projects_per_year", self.churn_projects_per_year)?;

        let years = self.forecast_years();
        if years > MAX_FORECAST_YEARS {
            return Err(ParameterError::InvalidValue {
                name: "forecast_end",
                reason: format!("{} forecast years exceeds the limit of {}", years, MAX_FORECAST_YEARS),
            });
        }

        if self.forecast_end < self.forecast_start {
            log::warn!(
                "forecast_end {} precedes forecast_start {}; forecast will be empty",
                self.forecast_end,
                self.forecast_start
            );
        }

        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ParameterError> {
    value.parse().map_err(|_| ParameterError::Unparsable {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn check_price(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ParameterError::InvalidValue {
            name,
            reason: format!("{} must be a finite, non-negative amount", value),
        });
    }
    Ok(())
}

fn check_count(name: &'static str, value: i64) -> Result<(), ParameterError> {
    if value < 0 {
        return Err(ParameterError::InvalidValue {
            name,
            reason: format!("{} must not be negative", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        let params = ForecastParameters::default();
        assert_eq!(params.base_year, 2024);
        assert_eq!(params.forecast_start, 2025);
        assert_eq!(params.forecast_end, 2030);
        assert_eq!(params.base_active_projects, 25);
        assert_eq!(params.new_projects_per_year, 8);
        assert_eq!(params.churn_projects_per_year, 5);
        assert_eq!(params.spare_parts_growth_rate, 0.05);
        assert_eq!(params.forecast_years(), 6);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_set_by_name() {
        let mut params = ForecastParameters::default();
        params.set("forecast_end", " 2040 ").unwrap();
        params.set("avg_spare_parts", "75000.5").unwrap();
        assert_eq!(params.forecast_end, 2040);
        assert_eq!(params.avg_spare_parts, 75000.5);

        let err = params.set("base_active_projects", "2.5").unwrap_err();
        assert!(matches!(err, ParameterError::Unparsable { .. }));

        let err = params.set("discount_rate", "0.1").unwrap_err();
        assert!(matches!(err, ParameterError::UnknownParameter(ref n) if n == "discount_rate"));
    }

    #[test]
    fn test_entries_cover_every_name() {
        let params = ForecastParameters::default();
        let names: Vec<_> = params.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, PARAMETER_NAMES.to_vec());
    }

    #[test]
    fn test_growth_rate_bounds() {
        let mut params = ForecastParameters::default();
        params.spare_parts_growth_rate = 0.5;
        assert!(params.validate().is_ok());

        params.spare_parts_growth_rate = 0.51;
        assert!(params.validate().is_err());

        params.spare_parts_growth_rate = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let mut params = ForecastParameters::default();
        params.avg_other_service = -1.0;
        assert!(params.validate().is_err());

        let mut params = ForecastParameters::default();
        params.churn_projects_per_year = -3;
        assert!(params.validate().is_err());

        let mut params = ForecastParameters::default();
        params.avg_service_contract = f64::INFINITY;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_forecast_span_limit() {
        let mut params = ForecastParameters {
            forecast_start: 2025,
            forecast_end: 2025 + MAX_FORECAST_YEARS as i32 - 1,
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        params.forecast_end += 1;
        let err = params.validate().unwrap_err();
        assert!(matches!(err, ParameterError::InvalidValue { name: "forecast_end", .. }));

        params.forecast_start = i32::MIN;
        params.forecast_end = i32::MAX;
        assert_eq!(params.forecast_years(), 4_294_967_296);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_inverted_range_is_not_an_error() {
        let params = ForecastParameters {
            forecast_start: 2030,
            forecast_end: 2025,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.forecast_years(), 0);
    }
}
