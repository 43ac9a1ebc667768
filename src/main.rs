//! Revenue Forecast CLI
//!
//! Command-line interface for running the revenue waterfall forecast

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use revenue_forecast::{
    params::{load_parameters, DEFAULT_PARAMETERS_PATH},
    report::{self, ForecastReport, DEFAULT_CHART_WIDTH},
    ForecastEngine, ForecastParameters,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "revenue_forecast")]
#[command(about = "Annual revenue waterfall forecast")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the forecast and print the table and charts
    Run {
        /// Parameter file with `parameter,value` rows
        #[arg(short, long, value_name = "CSV")]
        params: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,

        /// Write the forecast table as CSV
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Write the full report as JSON
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        /// Skip the terminal charts
        #[arg(long)]
        no_charts: bool,

        /// Bar width of the terminal charts
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        chart_width: usize,
    },
    /// Print the parameter values a run would use
    Defaults {
        /// Parameter file with `parameter,value` rows
        #[arg(short, long, value_name = "CSV")]
        params: Option<PathBuf>,
    },
}

/// Per-parameter overrides, applied after the parameter file
#[derive(Args, Debug, Default)]
struct Overrides {
    #[arg(long)]
    base_year: Option<i32>,
    #[arg(long)]
    forecast_start: Option<i32>,
    #[arg(long)]
    forecast_end: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    base_active_projects: Option<i64>,
    #[arg(long)]
    new_projects_per_year: Option<i64>,
    #[arg(long)]
    churn_projects_per_year: Option<i64>,
    #[arg(long)]
    avg_service_contract: Option<f64>,
    #[arg(long)]
    avg_spare_parts: Option<f64>,
    #[arg(long)]
    avg_other_service: Option<f64>,
    #[arg(long)]
    spare_parts_growth_rate: Option<f64>,
}

impl Overrides {
    fn apply(&self, params: &mut ForecastParameters) {
        if let Some(v) = self.base_year {
            params.base_year = v;
        }
        if let Some(v) = self.forecast_start {
            params.forecast_start = v;
        }
        if let Some(v) = self.forecast_end {
            params.forecast_end = v;
        }
        if let Some(v) = self.base_active_projects {
            params.base_active_projects = v;
        }
        if let Some(v) = self.new_projects_per_year {
            params.new_projects_per_year = v;
        }
        if let Some(v) = self.churn_projects_per_year {
            params.churn_projects_per_year = v;
        }
        if let Some(v) = self.avg_service_contract {
            params.avg_service_contract = v;
        }
        if let Some(v) = self.avg_spare_parts {
            params.avg_spare_parts = v;
        }
        if let Some(v) = self.avg_other_service {
            params.avg_other_service = v;
        }
        if let Some(v) = self.spare_parts_growth_rate {
            params.spare_parts_growth_rate = v;
        }
    }
}

/// Defaults, then the parameter file (explicit, or the default one if present)
fn base_parameters(path: Option<&Path>) -> anyhow::Result<ForecastParameters> {
    let defaults = ForecastParameters::default();
    match path {
        Some(path) => load_parameters(path, defaults)
            .with_context(|| format!("Failed to load parameters from {}", path.display())),
        None if Path::new(DEFAULT_PARAMETERS_PATH).exists() => {
            load_parameters(DEFAULT_PARAMETERS_PATH, defaults)
                .with_context(|| format!("Failed to load parameters from {}", DEFAULT_PARAMETERS_PATH))
        }
        None => Ok(defaults),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults { params } => {
            let params = base_parameters(params.as_deref())?;
            for (name, value) in params.entries() {
                println!("{:<26} {}", name, value);
            }
        }
        Commands::Run {
            params,
            overrides,
            csv,
            json,
            no_charts,
            chart_width,
        } => {
            let mut params = base_parameters(params.as_deref())?;
            overrides.apply(&mut params);
            params.validate().context("Invalid forecast parameters")?;

            println!("Annual Revenue Waterfall Forecast");
            println!("=================================\n");

            let engine = ForecastEngine::new(params.clone());
            let result = engine.project_checked().context("Forecast computation failed")?;
            log::info!("Forecast complete: {} years", result.len());

            if result.has_negative_projects() {
                log::warn!("Churn drives active projects below zero within the forecast");
            }

            println!("Forecast Results:");
            print!("{}", report::render_table(&result));

            let summary = result.summary();
            println!("\nSummary:");
            println!("  Years: {}", summary.years);
            println!("  Total Revenue: ${:.2}", summary.total_revenue);
            if let Some(projects) = summary.final_active_projects {
                println!("  Final Active Projects: {}", projects);
            }
            if let Some(cagr) = summary.revenue_cagr {
                println!("  Revenue CAGR: {:.2}%", cagr * 100.0);
            }

            if !no_charts && !result.is_empty() {
                println!();
                print!(
                    "{}",
                    report::render_line_chart(&report::total_revenue_series(&result), chart_width)
                );
                println!();
                print!(
                    "{}",
                    report::render_stacked_chart(&report::breakdown_series(&result), chart_width)
                );
            }

            if let Some(path) = csv {
                report::write_csv_path(&path, &result)
                    .with_context(|| format!("Unable to write CSV to {}", path.display()))?;
                println!("\nForecast table written to: {}", path.display());
            }

            if let Some(path) = json {
                ForecastReport::new(params, result)
                    .write_json(&path)
                    .with_context(|| format!("Unable to write JSON to {}", path.display()))?;
                println!("Forecast report written to: {}", path.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top() {
        let mut params = ForecastParameters::default();
        let overrides = Overrides {
            forecast_end: Some(2040),
            spare_parts_growth_rate: Some(0.1),
            ..Default::default()
        };
        overrides.apply(&mut params);
        assert_eq!(params.forecast_end, 2040);
        assert_eq!(params.spare_parts_growth_rate, 0.1);
        assert_eq!(params.forecast_start, 2025);
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "revenue_forecast",
            "run",
            "--forecast-end",
            "2035",
            "--base-active-projects",
            "-4",
            "--no-charts",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { overrides, no_charts, chart_width, .. } => {
                assert_eq!(overrides.forecast_end, Some(2035));
                assert_eq!(overrides.base_active_projects, Some(-4));
                assert!(no_charts);
                assert_eq!(chart_width, DEFAULT_CHART_WIDTH);
            }
            Commands::Defaults { .. } => panic!("expected run"),
        }
    }
}
