//! Chart series for the forecast and their terminal renderings

use crate::projection::ForecastResult;
use serde::{Deserialize, Serialize};

pub const TOTAL_REVENUE_TITLE: &str = "Total Revenue Forecast";
pub const BREAKDOWN_TITLE: &str = "Revenue Breakdown by Category";

/// Default bar width used by the CLI
pub const DEFAULT_CHART_WIDTH: usize = 50;

/// Category names and the glyph each one is drawn with in stacked bars
pub const CATEGORIES: [(&str, char); 3] = [
    ("Service Contract Revenue", '#'),
    ("Spare Parts Revenue", '='),
    ("Other Service Revenue", '.'),
];

/// One `(year, value)` series drawn as a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub title: String,
    pub points: Vec<(i32, f64)>,
}

/// Revenue components for one year of the stacked chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub year: i32,
    pub service_contract_revenue: f64,
    pub spare_parts_revenue: f64,
    pub other_service_revenue: f64,
}

impl StackedPoint {
    fn components(&self) -> [f64; 3] {
        [
            self.service_contract_revenue,
            self.spare_parts_revenue,
            self.other_service_revenue,
        ]
    }
}

/// Per-year breakdown drawn as stacked bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSeries {
    pub title: String,
    pub points: Vec<StackedPoint>,
}

/// Total revenue by year
pub fn total_revenue_series(result: &ForecastResult) -> LineSeries {
    LineSeries {
        title: TOTAL_REVENUE_TITLE.to_string(),
        points: result.records.iter().map(|r| (r.year, r.total_revenue)).collect(),
    }
}

/// Service, spare parts and other revenue by year
pub fn breakdown_series(result: &ForecastResult) -> StackedSeries {
    StackedSeries {
        title: BREAKDOWN_TITLE.to_string(),
        points: result
            .records
            .iter()
            .map(|r| StackedPoint {
                year: r.year,
                service_contract_revenue: r.service_contract_revenue,
                spare_parts_revenue: r.spare_parts_revenue,
                other_service_revenue: r.other_service_revenue,
            })
            .collect(),
    }
}

/// Bar length for `value` when `max` fills `width` characters.
/// Non-positive values get no bar.
fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if value <= 0.0 || max <= 0.0 || !value.is_finite() || !max.is_finite() {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// Draw the total revenue series as one horizontal bar per year
pub fn render_line_chart(series: &LineSeries, width: usize) -> String {
    let mut out = format!("{}\n", series.title);
    let max = series.points.iter().map(|&(_, v)| v).fold(0.0_f64, f64::max);

    for &(year, value) in &series.points {
        let bar = "*".repeat(bar_len(value, max, width));
        out.push_str(&format!("{:>6} |{:<width$} {:.2}\n", year, bar, value, width = width));
    }
    out
}

/// Draw the breakdown as stacked bars, one glyph per category, plus a legend
pub fn render_stacked_chart(series: &StackedSeries, width: usize) -> String {
    let mut out = format!("{}\n", series.title);
    let max = series
        .points
        .iter()
        .map(|p| p.components().iter().filter(|v| **v > 0.0).sum::<f64>())
        .fold(0.0_f64, f64::max);

    for point in &series.points {
        let mut bar = String::new();
        for (value, (_, glyph)) in point.components().iter().zip(CATEGORIES.iter()) {
            bar.extend(std::iter::repeat(*glyph).take(bar_len(*value, max, width)));
        }
        let total: f64 = point.components().iter().sum();
        out.push_str(&format!(
            "{:>6} |{:<width$} {:.2}\n",
            point.year,
            bar,
            total,
            width = width + 2
        ));
    }

    let legend: Vec<String> = CATEGORIES
        .iter()
        .map(|(name, glyph)| format!("{} {}", glyph, name))
        .collect();
    out.push_str(&format!("       {}\n", legend.join("   ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ForecastParameters;
    use crate::projection::compute;

    #[test]
    fn test_series_follow_records() {
        let result = compute(&ForecastParameters::default());
        let line = total_revenue_series(&result);
        let stacked = breakdown_series(&result);

        assert_eq!(line.title, TOTAL_REVENUE_TITLE);
        assert_eq!(line.points.len(), result.len());
        assert_eq!(stacked.points.len(), result.len());

        for ((point, stack), record) in line.points.iter().zip(&stacked.points).zip(&result.records) {
            assert_eq!(point.0, record.year);
            assert_eq!(point.1, record.total_revenue);
            assert_eq!(stack.year, record.year);
            assert_eq!(stack.spare_parts_revenue, record.spare_parts_revenue);
        }
    }

    #[test]
    fn test_line_chart_scales_to_width() {
        let series = LineSeries {
            title: "t".to_string(),
            points: vec![(2025, 50.0), (2026, 100.0), (2027, -10.0)],
        };
        let chart = render_line_chart(&series, 10);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "t");
        assert_eq!(lines[1].matches('*').count(), 5);
        assert_eq!(lines[2].matches('*').count(), 10);
        assert_eq!(lines[3].matches('*').count(), 0);
        assert!(lines[3].ends_with("-10.00"));
    }

    #[test]
    fn test_stacked_chart_glyphs() {
        let series = StackedSeries {
            title: "s".to_string(),
            points: vec![StackedPoint {
                year: 2025,
                service_contract_revenue: 40.0,
                spare_parts_revenue: 40.0,
                other_service_revenue: 20.0,
            }],
        };
        let chart = render_stacked_chart(&series, 10);
        let row = chart.lines().nth(1).unwrap();

        assert!(row.contains("####====.."));
        assert!(row.ends_with("100.00"));
        assert!(chart.contains("# Service Contract Revenue"));
    }

    #[test]
    fn test_empty_series_render_title_only() {
        let result = ForecastResult::new();
        let chart = render_line_chart(&total_revenue_series(&result), 20);
        assert_eq!(chart, format!("{}\n", TOTAL_REVENUE_TITLE));
    }
}
