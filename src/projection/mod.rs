//! Savings projection: inputs, the year/month accumulation engine, and the
//! summary figures derived from its result.

pub mod engine;
pub mod summary;
pub mod types;

pub use engine::project;
pub use summary::{ProfitTone, Summary, round2};
pub use types::{
    InputSet, MAX_LIFESPAN_YEARS, MONTHS_PER_YEAR, MonthlyRecord, ProjectionResult, YearlyRecord,
    finite_or_zero,
};
