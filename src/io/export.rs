//! CSV and JSON export for projection series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::form::Advisory;
use crate::projection::{InputSet, MonthlyRecord, ProjectionResult, Summary, YearlyRecord};

/// Column header for the yearly CSV export.
const YEARLY_HEADER: &str = "year,price_per_kwh,savings,cumulative";

/// Column header for the monthly CSV export.
const MONTHLY_HEADER: &str = "month,price_per_kwh,savings,cumulative";

/// Writes the yearly series as CSV to any writer.
///
/// Money columns use two decimals, prices four. Produces deterministic
/// output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_yearly_csv(records: &[YearlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(YEARLY_HEADER.split(','))?;
    for r in records {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.4}", r.price_per_kwh),
            format!("{:.2}", r.savings),
            format!("{:.2}", r.cumulative),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the monthly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_monthly_csv(records: &[MonthlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(MONTHLY_HEADER.split(','))?;
    for r in records {
        wtr.write_record(&[
            r.month.to_string(),
            format!("{:.4}", r.price_per_kwh),
            format!("{:.2}", r.savings),
            format!("{:.2}", r.cumulative),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the yearly series to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_yearly_csv(records: &[YearlyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_yearly_csv(records, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = records.len(), "yearly series written");
    Ok(())
}

/// Exports the monthly series to a CSV file at `path`.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_monthly_csv(records: &[MonthlyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_monthly_csv(records, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = records.len(), "monthly series written");
    Ok(())
}

/// Everything a consumer needs to redraw the calculator output.
#[derive(Debug, Serialize)]
pub struct ProjectionReport<'a> {
    /// Inputs the projection ran with, after clamping.
    pub input: &'a InputSet,
    pub summary: &'a Summary,
    pub advisories: Vec<String>,
    pub result: &'a ProjectionResult,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(
        input: &'a InputSet,
        summary: &'a Summary,
        advisories: &[Advisory],
        result: &'a ProjectionResult,
    ) -> Self {
        Self {
            input,
            summary,
            advisories: advisories.iter().map(ToString::to_string).collect(),
            result,
        }
    }
}

/// Serializes a report as pretty-printed JSON.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_json(report: &ProjectionReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
