//! Crate-level error type for the calculator binary and export paths.

use std::io;

use crate::config::ConfigError;

/// Errors surfaced by configuration loading and result export.
///
/// The projection itself never fails; only the surfaces around it do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Several validation failures reported together.
    #[error("{} configuration errors:\n{}", .0.len(), join_lines(.0))]
    Invalid(Vec<ConfigError>),
    #[error("failed to write {path}: {source}")]
    Export { path: String, source: io::Error },
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn join_lines(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_error() {
        let err = Error::Invalid(vec![
            ConfigError {
                field: "economics.install_cost".into(),
                message: "must be >= 0".into(),
            },
            ConfigError {
                field: "display.currency".into(),
                message: "must not be empty".into(),
            },
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 configuration errors"));
        assert!(text.contains("economics.install_cost"));
        assert!(text.contains("display.currency"));
    }

    #[test]
    fn config_error_is_transparent() {
        let err = Error::from(ConfigError {
            field: "preset".into(),
            message: "unknown preset".into(),
        });
        assert_eq!(err.to_string(), "config error: preset: unknown preset");
    }
}
