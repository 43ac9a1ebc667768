//! CSV-based parameter loader
//!
//! Reads `parameter,value` rows and applies them on top of a starting
//! parameter set, so a file only needs the values it changes.

use super::ForecastParameters;
use crate::error::ParameterError;
use csv::Reader;
use std::path::Path;

/// Default parameter file looked up by the CLI when `--params` is not given
pub const DEFAULT_PARAMETERS_PATH: &str = "data/forecast_parameters.csv";

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    parameter: String,
    value: String,
}

/// Load parameter overrides from a CSV file onto `base`
pub fn load_parameters<P: AsRef<Path>>(
    path: P,
    base: ForecastParameters,
) -> Result<ForecastParameters, ParameterError> {
    let path = path.as_ref();
    log::info!("Loading forecast parameters from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_parameters_from_reader(file, base)
}

/// Load parameter overrides from any reader (e.g., string buffer, request body)
pub fn load_parameters_from_reader<R: std::io::Read>(
    reader: R,
    base: ForecastParameters,
) -> Result<ForecastParameters, ParameterError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut params = base;

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        params.set(&row.parameter, &row.value)?;
        log::debug!("parameter {} = {}", row.parameter.trim(), row.value.trim());
    }

    Ok(params)
}
