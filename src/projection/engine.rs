//! Year-by-year and month-by-month savings projection with payback detection.

use tracing::debug;

use super::types::{InputSet, MONTHS_PER_YEAR, MonthlyRecord, ProjectionResult, YearlyRecord};

/// Tracks the first month whose cumulative savings cover the install cost.
#[derive(Debug, Clone, Copy)]
struct PaybackTracker {
    install_cost: f64,
    month: Option<u32>,
}

impl PaybackTracker {
    fn new(install_cost: f64) -> Self {
        Self {
            install_cost,
            month: None,
        }
    }

    /// Records `month` if it is the first to reach the install cost.
    fn observe(&mut self, month: u32, cumulative: f64) {
        if self.month.is_none() && cumulative >= self.install_cost {
            self.month = Some(month);
        }
    }
}

/// Projects savings over the installation lifespan.
///
/// Year 0 is the baseline: the first-year savings at the entered price.
/// Every following year escalates the previous year's price by
/// `price_increase_pct` and earns `price * profit_per_kwh`, spread evenly over
/// twelve months. Monthly cumulative savings run across the whole lifespan.
///
/// Never fails: non-finite inputs are treated as 0 and the lifespan is
/// capped at [`MAX_LIFESPAN_YEARS`](super::types::MAX_LIFESPAN_YEARS).
///
/// # Examples
///
/// ```
/// use battery_payback::projection::{InputSet, project};
///
/// let input = InputSet {
///     yield_kwh: 3000.0,
///     self_old_kwh: 1000.0,
///     self_new_kwh: 2000.0,
///     price_per_kwh: 0.5,
///     install_cost: 1500.0,
///     lifespan_years: 3,
///     ..InputSet::default()
/// };
/// let result = project(&input);
/// assert_eq!(result.yearly.len(), 4);
/// assert_eq!(result.monthly.len(), 37);
/// assert!(result.is_profitable);
/// ```
pub fn project(input: &InputSet) -> ProjectionResult {
    let input = input.sanitized();
    let profit_per_kwh = input.profit_per_kwh();
    let base_year_savings = profit_per_kwh * input.price_per_kwh;
    let growth = input.price_increase_pct / 100.0;
    let lifespan = input.lifespan_years;
    let months_per_year = f64::from(MONTHS_PER_YEAR);

    let mut yearly = Vec::with_capacity(lifespan as usize + 1);
    let mut monthly = Vec::with_capacity((lifespan * MONTHS_PER_YEAR) as usize + 1);
    let mut payback = PaybackTracker::new(input.install_cost);

    let seed_month_savings = base_year_savings / months_per_year;
    yearly.push(YearlyRecord {
        year: 0,
        price_per_kwh: input.price_per_kwh,
        savings: base_year_savings,
        cumulative: base_year_savings,
    });
    monthly.push(MonthlyRecord {
        month: 0,
        price_per_kwh: input.price_per_kwh,
        savings: seed_month_savings,
        cumulative: seed_month_savings,
    });
    payback.observe(0, seed_month_savings);

    let mut price = input.price_per_kwh;
    let mut year_cumulative = base_year_savings;
    let mut month_cumulative = seed_month_savings;

    for year in 1..=lifespan {
        price += price * growth;
        let year_savings = price * profit_per_kwh;
        year_cumulative += year_savings;
        yearly.push(YearlyRecord {
            year,
            price_per_kwh: price,
            savings: year_savings,
            cumulative: year_cumulative,
        });

        let month_savings = year_savings / months_per_year;
        for offset in 1..=MONTHS_PER_YEAR {
            let month = (year - 1) * MONTHS_PER_YEAR + offset;
            month_cumulative += month_savings;
            monthly.push(MonthlyRecord {
                month,
                price_per_kwh: price,
                savings: month_savings,
                cumulative: month_cumulative,
            });
            payback.observe(month, month_cumulative);
        }
    }

    let total_profit = year_cumulative - input.install_cost;
    let is_profitable = total_profit > 0.0;
    let payback_month = if is_profitable { payback.month } else { None };

    debug!(
        profit_per_kwh,
        base_year_savings,
        total_profit,
        ?payback_month,
        lifespan,
        "projection complete"
    );

    ProjectionResult {
        yearly,
        monthly,
        install_cost: input.install_cost,
        total_profit,
        is_profitable,
        payback_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(profit_kwh: f64, price: f64, cost: f64, inc: f64, years: u32) -> InputSet {
        InputSet {
            yield_kwh: 10_000.0,
            self_old_kwh: 0.0,
            self_new_kwh: profit_kwh,
            price_per_kwh: price,
            install_cost: cost,
            price_increase_pct: inc,
            lifespan_years: years,
            ..InputSet::default()
        }
    }

    #[test]
    fn series_lengths_match_lifespan() {
        let result = project(&input(1000.0, 0.3, 2000.0, 2.0, 7));
        assert_eq!(result.yearly.len(), 8);
        assert_eq!(result.monthly.len(), 7 * 12 + 1);
        assert_eq!(result.lifespan_years(), 7);
    }

    #[test]
    fn price_escalates_once_per_year() {
        let result = project(&input(100.0, 1.0, 0.0, 10.0, 2));
        assert!((result.yearly[1].price_per_kwh - 1.1).abs() < 1e-12);
        assert!((result.yearly[2].price_per_kwh - 1.21).abs() < 1e-12);
        // all twelve months of year 2 carry year 2's price
        for m in &result.monthly[13..25] {
            assert_eq!(m.price_per_kwh, result.yearly[2].price_per_kwh);
        }
    }

    #[test]
    fn monthly_cumulative_carries_across_years() {
        let result = project(&input(1200.0, 1.0, 0.0, 0.0, 2));
        // seed month is 100, every following month adds 100
        assert!((result.monthly[0].cumulative - 100.0).abs() < 1e-9);
        assert!((result.monthly[12].cumulative - 1300.0).abs() < 1e-9);
        assert!((result.monthly[24].cumulative - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn payback_is_first_crossing() {
        // 100/month, cost 450: seed=100, m1=200, m2=300, m3=400, m4=500
        let result = project(&input(1200.0, 1.0, 450.0, 0.0, 1));
        assert_eq!(result.payback_month, Some(4));
    }

    #[test]
    fn payback_on_exact_equality() {
        let result = project(&input(1200.0, 1.0, 400.0, 0.0, 1));
        assert_eq!(result.payback_month, Some(3));
    }

    #[test]
    fn payback_can_land_on_seed_month() {
        let result = project(&input(1200.0, 1.0, 0.0, 0.0, 1));
        assert_eq!(result.payback_month, Some(0));
    }

    #[test]
    fn unprofitable_hides_payback() {
        let result = project(&input(1200.0, 1.0, 1_000_000.0, 0.0, 5));
        assert!(!result.is_profitable);
        assert_eq!(result.payback_month, None);
    }

    #[test]
    fn zero_total_profit_is_not_profitable() {
        // 2 years at 1200 each (baseline + year 1) against a 2400 cost
        let result = project(&input(1200.0, 1.0, 2400.0, 0.0, 1));
        assert_eq!(result.total_profit, 0.0);
        assert!(!result.is_profitable);
        assert_eq!(result.payback_month, None);
    }

    #[test]
    fn non_finite_inputs_produce_finite_outputs() {
        let mut bad = input(1000.0, f64::NAN, f64::INFINITY, f64::NAN, 3);
        bad.self_old_kwh = f64::NEG_INFINITY;
        let result = project(&bad);
        assert!(result.total_profit.is_finite());
        assert!(result.monthly.iter().all(|m| m.cumulative.is_finite()));
        assert!(result.yearly.iter().all(|y| y.savings == 0.0));
    }

    #[test]
    fn zero_yield_projects_nothing() {
        let mut no_yield = input(1000.0, 0.4, 100.0, 3.0, 4);
        no_yield.yield_kwh = 0.0;
        let result = project(&no_yield);
        assert!(result.monthly.iter().all(|m| m.cumulative == 0.0));
        assert!(!result.is_profitable);
        assert_eq!(result.payback_month, None);
    }

    #[test]
    fn huge_lifespan_is_capped() {
        let result = project(&input(1.0, 1.0, 0.0, 0.0, u32::MAX));
        assert_eq!(result.lifespan_years(), super::super::types::MAX_LIFESPAN_YEARS);
    }
}
