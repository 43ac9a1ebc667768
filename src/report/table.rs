//! Tabular output: terminal table and CSV

use crate::projection::{ForecastResult, YearRecord};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Column headers shared by the terminal table and the CSV file
pub const COLUMNS: [&str; 6] = [
    "Year",
    "Active Projects",
    "Service Contract Revenue",
    "Spare Parts Revenue",
    "Other Service Revenue",
    "Total Revenue",
];

#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Active Projects")]
    active_projects: i64,
    #[serde(rename = "Service Contract Revenue")]
    service_contract_revenue: f64,
    #[serde(rename = "Spare Parts Revenue")]
    spare_parts_revenue: f64,
    #[serde(rename = "Other Service Revenue")]
    other_service_revenue: f64,
    #[serde(rename = "Total Revenue")]
    total_revenue: f64,
}

impl From<&YearRecord> for CsvRow {
    fn from(r: &YearRecord) -> Self {
        Self {
            year: r.year,
            active_projects: r.active_projects,
            service_contract_revenue: r.service_contract_revenue,
            spare_parts_revenue: r.spare_parts_revenue,
            other_service_revenue: r.other_service_revenue,
            total_revenue: r.total_revenue,
        }
    }
}

/// Render the forecast as a fixed-width text table
pub fn render_table(result: &ForecastResult) -> String {
    let mut out = format!(
        "{:>6} {:>15} {:>24} {:>20} {:>21} {:>16}\n",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5]
    );
    out.push_str(&"-".repeat(107));
    out.push('\n');

    for r in &result.records {
        out.push_str(&format!(
            "{:>6} {:>15} {:>24.2} {:>20.2} {:>21.2} {:>16.2}\n",
            r.year,
            r.active_projects,
            r.service_contract_revenue,
            r.spare_parts_revenue,
            r.other_service_revenue,
            r.total_revenue,
        ));
    }
    out
}

/// Write the forecast as CSV to any writer
pub fn write_csv<W: Write>(writer: W, result: &ForecastResult) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if result.is_empty() {
        // serialize() only emits headers alongside the first row
        csv_writer.write_record(COLUMNS)?;
    }
    for record in &result.records {
        csv_writer.serialize(CsvRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the forecast as CSV to a file
pub fn write_csv_path<P: AsRef<Path>>(path: P, result: &ForecastResult) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_csv(file, result)
}
