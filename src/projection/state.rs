//! Running state of the project waterfall

use crate::error::ForecastError;
use crate::params::ForecastParameters;

/// Active project count carried from one forecast year to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterfallState {
    /// Year of the most recent update (base year before the first advance)
    pub year: i32,

    /// Active projects after the most recent update.
    /// Not clamped: churn can drive it below zero.
    pub active_projects: i64,
}

impl WaterfallState {
    /// Start from the base year's active project count
    pub fn from_params(params: &ForecastParameters) -> Self {
        Self {
            year: params.base_year,
            active_projects: params.base_active_projects,
        }
    }

    /// Move to `year`: churn comes off first, then new projects are added.
    /// On overflow the state is left untouched.
    pub fn advance_year(&mut self, year: i32, params: &ForecastParameters) -> Result<(), ForecastError> {
        let active_projects = self
            .active_projects
            .checked_sub(params.churn_projects_per_year)
            .and_then(|n| n.checked_add(params.new_projects_per_year))
            .ok_or(ForecastError::ProjectCountOverflow { year })?;

        self.year = year;
        self.active_projects = active_projects;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_net_change_once_per_year() {
        let params = ForecastParameters::default();
        let mut state = WaterfallState::from_params(&params);
        assert_eq!(state.active_projects, 25);

        state.advance_year(2025, &params).unwrap();
        assert_eq!(state.year, 2025);
        assert_eq!(state.active_projects, 28);

        state.advance_year(2026, &params).unwrap();
        assert_eq!(state.active_projects, 31);
    }

    #[test]
    fn test_churn_can_go_negative() {
        let params = ForecastParameters {
            base_active_projects: 1,
            new_projects_per_year: 0,
            churn_projects_per_year: 2,
            ..Default::default()
        };
        let mut state = WaterfallState::from_params(&params);
        state.advance_year(2025, &params).unwrap();
        state.advance_year(2026, &params).unwrap();
        assert_eq!(state.active_projects, -3);
    }

    #[test]
    fn test_overflow_leaves_state_unchanged() {
        let params = ForecastParameters {
            base_active_projects: i64::MAX,
            new_projects_per_year: 1,
            churn_projects_per_year: 0,
            ..Default::default()
        };
        let mut state = WaterfallState::from_params(&params);
        let err = state.advance_year(2025, &params).unwrap_err();

        assert_eq!(err, ForecastError::ProjectCountOverflow { year: 2025 });
        assert_eq!(state.year, 2024);
        assert_eq!(state.active_projects, i64::MAX);
    }

    #[test]
    fn test_churn_underflow_detected() {
        let params = ForecastParameters {
            base_active_projects: i64::MIN,
            new_projects_per_year: 10,
            churn_projects_per_year: 1,
            ..Default::default()
        };
        let mut state = WaterfallState::from_params(&params);
        assert!(state.advance_year(2025, &params).is_err());
    }
}
