//! Projection inputs, per-period records, and the aggregate result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Months in one projection year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest installation lifespan the engine will project, in years.
///
/// Larger values are capped before projection so the series stay bounded.
pub const MAX_LIFESPAN_YEARS: u32 = 100;

/// Calculator inputs for one projection run.
///
/// Energy values are annual (kWh/year). `self_old` and `self_new` are the
/// absolute self-consumed energy before and after the battery is installed;
/// the percentage fields are carried along for reporting only.
///
/// # Examples
///
/// ```
/// use battery_payback::projection::InputSet;
///
/// let input = InputSet {
///     yield_kwh: 3600.0,
///     self_old_kwh: 1080.0,
///     self_new_kwh: 2700.0,
///     ..InputSet::default()
/// };
/// assert_eq!(input.profit_per_kwh(), 1620.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSet {
    /// Installed power (W).
    pub power_w: f64,
    /// Annual yield (kWh/year).
    pub yield_kwh: f64,
    /// Self-consumption without the battery (% of yield).
    pub self_old_pct: f64,
    /// Self-consumption without the battery (kWh/year).
    pub self_old_kwh: f64,
    /// Self-consumption with the battery (% of yield).
    pub self_new_pct: f64,
    /// Self-consumption with the battery (kWh/year).
    pub self_new_kwh: f64,
    /// Electricity price in the first year (currency/kWh).
    pub price_per_kwh: f64,
    /// One-off installation cost (currency).
    pub install_cost: f64,
    /// Annual electricity price increase (percent/year).
    pub price_increase_pct: f64,
    /// Installation lifespan in whole years.
    pub lifespan_years: u32,
}

impl InputSet {
    /// Extra self-consumed energy gained by the battery (kWh/year).
    ///
    /// Zero when there is no yield: self-consumption shares of nothing are
    /// undefined, so the installation is treated as gaining nothing.
    pub fn profit_per_kwh(&self) -> f64 {
        if self.yield_kwh == 0.0 {
            return 0.0;
        }
        self.self_new_kwh - self.self_old_kwh
    }

    /// Returns a copy with every non-finite number replaced by 0 and the
    /// lifespan capped at [`MAX_LIFESPAN_YEARS`].
    pub fn sanitized(&self) -> Self {
        Self {
            power_w: finite_or_zero(self.power_w),
            yield_kwh: finite_or_zero(self.yield_kwh),
            self_old_pct: finite_or_zero(self.self_old_pct),
            self_old_kwh: finite_or_zero(self.self_old_kwh),
            self_new_pct: finite_or_zero(self.self_new_pct),
            self_new_kwh: finite_or_zero(self.self_new_kwh),
            price_per_kwh: finite_or_zero(self.price_per_kwh),
            install_cost: finite_or_zero(self.install_cost),
            price_increase_pct: finite_or_zero(self.price_increase_pct),
            lifespan_years: self.lifespan_years.min(MAX_LIFESPAN_YEARS),
        }
    }
}

/// Maps NaN and infinities to 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Savings for one projection year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyRecord {
    /// Year index; 0 is the un-escalated baseline year.
    pub year: u32,
    /// Electricity price applied in this year (currency/kWh).
    pub price_per_kwh: f64,
    /// Savings earned in this year (currency).
    pub savings: f64,
    /// Savings accumulated through this year (currency).
    pub cumulative: f64,
}

/// Savings for one projection month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyRecord {
    /// Month index; 0 is the baseline month.
    pub month: u32,
    /// Electricity price of the owning year (currency/kWh).
    pub price_per_kwh: f64,
    /// Savings earned in this month (currency).
    pub savings: f64,
    /// Savings accumulated through this month, across all years (currency).
    pub cumulative: f64,
}

/// Complete output of one projection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// One record per year, `0..=lifespan_years`.
    pub yearly: Vec<YearlyRecord>,
    /// One record per month, `0..=lifespan_years * 12`.
    pub monthly: Vec<MonthlyRecord>,
    /// Installation cost the savings are measured against.
    pub install_cost: f64,
    /// Final cumulative savings minus the installation cost.
    pub total_profit: f64,
    /// `true` when `total_profit > 0`.
    pub is_profitable: bool,
    /// First month whose cumulative savings cover the install cost.
    ///
    /// Always `None` for an unprofitable installation.
    pub payback_month: Option<u32>,
}

impl ProjectionResult {
    /// Number of projected years after the baseline year.
    pub fn lifespan_years(&self) -> u32 {
        self.yearly.last().map_or(0, |r| r.year)
    }

    /// Cumulative savings at the end of the lifespan.
    pub fn final_cumulative(&self) -> f64 {
        self.yearly.last().map_or(0.0, |r| r.cumulative)
    }
}

impl fmt::Display for YearlyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={:>3} | price={:.4}/kWh  savings={:>10.2}  cumulative={:>10.2}",
            self.year, self.price_per_kwh, self.savings, self.cumulative,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_replaces_non_finite_values() {
        let input = InputSet {
            yield_kwh: f64::NAN,
            price_per_kwh: f64::INFINITY,
            install_cost: f64::NEG_INFINITY,
            self_new_kwh: 500.0,
            ..InputSet::default()
        };
        let clean = input.sanitized();
        assert_eq!(clean.yield_kwh, 0.0);
        assert_eq!(clean.price_per_kwh, 0.0);
        assert_eq!(clean.install_cost, 0.0);
        assert_eq!(clean.self_new_kwh, 500.0);
    }

    #[test]
    fn zero_yield_has_no_profit() {
        let input = InputSet {
            yield_kwh: 0.0,
            self_new_kwh: 500.0,
            ..InputSet::default()
        };
        assert_eq!(input.profit_per_kwh(), 0.0);
    }

    #[test]
    fn sanitized_caps_lifespan() {
        let input = InputSet {
            lifespan_years: 5_000,
            ..InputSet::default()
        };
        assert_eq!(input.sanitized().lifespan_years, MAX_LIFESPAN_YEARS);
    }

    #[test]
    fn empty_result_accessors() {
        let result = ProjectionResult {
            yearly: Vec::new(),
            monthly: Vec::new(),
            install_cost: 0.0,
            total_profit: 0.0,
            is_profitable: false,
            payback_month: None,
        };
        assert_eq!(result.lifespan_years(), 0);
        assert_eq!(result.final_cumulative(), 0.0);
    }

    #[test]
    fn yearly_record_display_does_not_panic() {
        let r = YearlyRecord {
            year: 3,
            price_per_kwh: 0.45,
            savings: 720.5,
            cumulative: 2800.0,
        };
        let s = format!("{r}");
        assert!(s.contains("year=  3"));
    }
}
