//! TOML-based calculator configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::form::{Advisory, Field, FormState, sync};
use crate::projection::MAX_LIFESPAN_YEARS;

/// Top-level calculator configuration parsed from TOML.
///
/// All fields have defaults matching the `default` preset. Load from TOML
/// with [`CalculatorConfig::from_toml_file`] or use
/// [`CalculatorConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Installation size and self-consumption shares.
    #[serde(default)]
    pub installation: InstallationConfig,
    /// Prices, costs, and horizon.
    #[serde(default)]
    pub economics: EconomicsConfig,
    /// Output formatting.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Installation size and self-consumption shares.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallationConfig {
    /// Installed power (W). Values above the maximum are clamped, not rejected.
    pub power_w: f64,
    /// Annual yield (kWh/year). Derived from `power_w` when omitted.
    pub yield_kwh: Option<f64>,
    /// Self-consumption without the battery (% of yield, 0–100).
    pub self_old_pct: f64,
    /// Self-consumption with the battery (% of yield, 0–100).
    pub self_new_pct: f64,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            power_w: 4000.0,
            yield_kwh: None,
            self_old_pct: 30.0,
            self_new_pct: 75.0,
        }
    }
}

/// Prices, costs, and horizon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicsConfig {
    /// First-year electricity price (currency/kWh).
    pub price_per_kwh: f64,
    /// One-off installation cost (currency).
    pub install_cost: f64,
    /// Annual price increase (percent/year, > -100).
    pub price_increase_pct: f64,
    /// Lifespan in whole years.
    pub lifespan_years: u32,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: 0.41,
            install_cost: 4000.0,
            price_increase_pct: 4.0,
            lifespan_years: 12,
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Currency symbol prefixed to money values.
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "€".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"economics.lifespan_years"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl CalculatorConfig {
    /// Returns the default calculator inputs.
    pub fn baseline() -> Self {
        Self {
            installation: InstallationConfig::default(),
            economics: EconomicsConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    /// Returns the high-price preset: expensive, fast-rising electricity.
    pub fn high_price() -> Self {
        Self {
            economics: EconomicsConfig {
                price_per_kwh: 0.55,
                price_increase_pct: 6.0,
                ..EconomicsConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the small-install preset: modest array with a short horizon.
    pub fn small_install() -> Self {
        Self {
            installation: InstallationConfig {
                power_w: 2000.0,
                self_old_pct: 35.0,
                self_new_pct: 60.0,
                ..InstallationConfig::default()
            },
            economics: EconomicsConfig {
                install_cost: 3000.0,
                lifespan_years: 10,
                ..EconomicsConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "high_price", "small_install"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::baseline()),
            "high_price" => Ok(Self::high_price()),
            "small_install" => Ok(Self::small_install()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every violation found.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let inst = &self.installation;
        let eco = &self.economics;

        let finite = [
            ("installation.power_w", inst.power_w),
            ("installation.yield_kwh", inst.yield_kwh.unwrap_or(0.0)),
            ("installation.self_old_pct", inst.self_old_pct),
            ("installation.self_new_pct", inst.self_new_pct),
            ("economics.price_per_kwh", eco.price_per_kwh),
            ("economics.install_cost", eco.install_cost),
            ("economics.price_increase_pct", eco.price_increase_pct),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                errors.push(ConfigError::new(field, "must be a finite number"));
            }
        }

        if inst.power_w < 0.0 {
            errors.push(ConfigError::new("installation.power_w", "must be >= 0"));
        }
        if inst.yield_kwh.is_some_and(|y| y < 0.0) {
            errors.push(ConfigError::new("installation.yield_kwh", "must be >= 0"));
        }
        for (field, pct) in [
            ("installation.self_old_pct", inst.self_old_pct),
            ("installation.self_new_pct", inst.self_new_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                errors.push(ConfigError::new(field, "must be in [0, 100]"));
            }
        }

        if eco.price_per_kwh < 0.0 {
            errors.push(ConfigError::new("economics.price_per_kwh", "must be >= 0"));
        }
        if eco.install_cost < 0.0 {
            errors.push(ConfigError::new("economics.install_cost", "must be >= 0"));
        }
        if eco.price_increase_pct <= -100.0 {
            errors.push(ConfigError::new(
                "economics.price_increase_pct",
                "must be > -100",
            ));
        }
        if eco.lifespan_years > MAX_LIFESPAN_YEARS {
            errors.push(ConfigError::new(
                "economics.lifespan_years",
                format!("must be <= {MAX_LIFESPAN_YEARS}"),
            ));
        }

        if self.display.currency.trim().is_empty() {
            errors.push(ConfigError::new("display.currency", "must not be empty"));
        }

        errors
    }

    /// Builds a synced form from this configuration.
    ///
    /// Absolute self-consumption values are derived from the percentages.
    /// An explicit `yield_kwh` wins and power is derived from it; otherwise
    /// yield is derived from power. Power is clamped either way.
    pub fn to_form(&self) -> (FormState, Vec<Advisory>) {
        let inst = &self.installation;
        let eco = &self.economics;
        let state = FormState {
            power_w: inst.power_w,
            yield_kwh: inst.yield_kwh.unwrap_or(0.0),
            self_old_pct: inst.self_old_pct,
            self_old_kwh: 0.0,
            self_new_pct: inst.self_new_pct,
            self_new_kwh: 0.0,
            price_per_kwh: eco.price_per_kwh,
            install_cost: eco.install_cost,
            price_increase_pct: eco.price_increase_pct,
            lifespan_years: f64::from(eco.lifespan_years),
        };
        let changed = if inst.yield_kwh.is_some() {
            Field::Yield
        } else {
            Field::Power
        };
        let outcome = sync(Some(changed), &state);
        (outcome.state, outcome.advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::MAX_POWER_W;

    #[test]
    fn baseline_preset_valid() {
        let cfg = CalculatorConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = CalculatorConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in CalculatorConfig::PRESETS {
            let cfg = CalculatorConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[installation]
power_w = 5000
yield_kwh = 4300
self_old_pct = 25
self_new_pct = 70

[economics]
price_per_kwh = 0.35
install_cost = 5500
price_increase_pct = 3
lifespan_years = 15

[display]
currency = "$"
"#;
        let cfg = CalculatorConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().and_then(|c| c.installation.yield_kwh),
            Some(4300.0)
        );
        assert_eq!(cfg.as_ref().map(|c| c.economics.lifespan_years), Some(15));
        assert_eq!(cfg.as_ref().map(|c| &*c.display.currency), Some("$"));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[economics]
lifespan_years = 10
bogus_field = true
"#;
        assert!(CalculatorConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[economics]
install_cost = 6000
"#;
        let cfg = CalculatorConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.economics.install_cost), Some(6000.0));
        assert_eq!(cfg.as_ref().map(|c| c.economics.lifespan_years), Some(12));
        assert_eq!(cfg.as_ref().map(|c| c.installation.power_w), Some(4000.0));
    }

    #[test]
    fn validation_collects_every_violation() {
        let mut cfg = CalculatorConfig::baseline();
        cfg.installation.self_new_pct = 120.0;
        cfg.economics.install_cost = -1.0;
        cfg.economics.lifespan_years = MAX_LIFESPAN_YEARS + 1;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "installation.self_new_pct"));
        assert!(errors.iter().any(|e| e.field == "economics.install_cost"));
        assert!(errors.iter().any(|e| e.field == "economics.lifespan_years"));
    }

    #[test]
    fn validation_catches_collapsing_price() {
        let mut cfg = CalculatorConfig::baseline();
        cfg.economics.price_increase_pct = -100.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "economics.price_increase_pct"));
    }

    #[test]
    fn oversized_power_is_valid_but_clamped() {
        let mut cfg = CalculatorConfig::baseline();
        cfg.installation.power_w = 12_000.0;
        assert!(cfg.validate().is_empty());
        let (form, advisories) = cfg.to_form();
        assert_eq!(form.power_w, MAX_POWER_W);
        assert_eq!(advisories.len(), 1);
    }

    #[test]
    fn to_form_derives_yield_and_absolutes() {
        let (form, advisories) = CalculatorConfig::baseline().to_form();
        assert!(advisories.is_empty());
        assert!((form.yield_kwh - 3600.0).abs() < 1e-9);
        assert!((form.self_old_kwh - 1080.0).abs() < 1e-6);
        assert!((form.self_new_kwh - 2700.0).abs() < 1e-6);
    }

    #[test]
    fn to_form_derives_power_from_explicit_yield() {
        let mut cfg = CalculatorConfig::baseline();
        cfg.installation.yield_kwh = Some(3000.0);
        let (form, advisories) = cfg.to_form();
        assert!(advisories.is_empty());
        assert_eq!(form.yield_kwh, 3000.0);
        assert!((form.power_w - 3000.0 / 0.9).abs() < 1e-9);
        assert!((form.self_old_kwh - 900.0).abs() < 1e-9);
    }

    #[test]
    fn to_form_clamps_power_derived_from_yield() {
        let mut cfg = CalculatorConfig::baseline();
        cfg.installation.yield_kwh = Some(9500.0);
        let (form, advisories) = cfg.to_form();
        assert_eq!(form.power_w, MAX_POWER_W);
        assert!((form.yield_kwh - 9000.0).abs() < 1e-9);
        assert_eq!(advisories.len(), 1);
    }
}
