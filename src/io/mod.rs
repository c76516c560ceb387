//! File and stream output for projection results.

pub mod export;
