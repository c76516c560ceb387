//! Plain-text rendering of the summary and the yearly savings table.

use std::fmt::Write;

use crate::projection::{ProjectionResult, Summary, YearlyRecord, round2};

/// Renders the yearly table: one row per year with savings and cumulative
/// savings rounded to two decimals.
pub fn render_yearly_table(records: &[YearlyRecord], currency: &str) -> String {
    let mut out = String::new();
    let savings_col = format!("Savings ({currency})");
    let cumulative_col = format!("Cumulative ({currency})");
    let _ = writeln!(out, "{:>5}  {savings_col:>14}  {cumulative_col:>17}", "Year");
    for r in records {
        let _ = writeln!(
            out,
            "{:>5}  {:>14.2}  {:>17.2}",
            r.year,
            round2(r.savings),
            round2(r.cumulative)
        );
    }
    out
}

/// Renders the three summary lines.
pub fn render_summary(summary: &Summary, currency: &str) -> String {
    summary.lines(currency).join("\n")
}

/// Full text report: summary, blank line, yearly table.
pub fn render_report(result: &ProjectionResult, currency: &str) -> String {
    let summary = Summary::from_result(result);
    format!(
        "--- Battery Payback ---\n{}\n\n{}",
        render_summary(&summary, currency),
        render_yearly_table(&result.yearly, currency)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{InputSet, project};

    fn result() -> ProjectionResult {
        project(&InputSet {
            yield_kwh: 10_000.0,
            self_new_kwh: 1200.0,
            price_per_kwh: 1.0,
            install_cost: 450.0,
            lifespan_years: 2,
            ..InputSet::default()
        })
    }

    #[test]
    fn table_has_header_plus_one_row_per_year() {
        let table = render_yearly_table(&result().yearly, "€");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Savings (€)"));
        assert!(lines[3].trim_start().starts_with('2'));
        assert!(lines[3].ends_with("3600.00"));
    }

    #[test]
    fn report_contains_summary_and_table() {
        let text = render_report(&result(), "$");
        assert!(text.contains("paid back after 4 months"));
        assert!(text.contains("Cumulative ($)"));
    }
}
