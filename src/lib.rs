//! Home battery profitability and payback-period calculator.

pub mod config;
pub mod error;
/// Form state and field-derivation rules.
pub mod form;
pub mod io;
/// Savings projection engine and result types.
pub mod projection;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;
