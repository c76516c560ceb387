//! Headline figures derived from a projection result.

use serde::Serialize;

use super::types::ProjectionResult;

/// Whether the headline profit should be presented as a gain or a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitTone {
    Profitable,
    Unprofitable,
}

/// Summary text inputs: average savings, payback, and total profit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `total_profit / lifespan_years`, or 0 when the lifespan is 0.
    pub average_yearly_savings: f64,
    pub lifespan_years: u32,
    pub payback_month: Option<u32>,
    pub total_profit: f64,
    pub tone: ProfitTone,
}

impl Summary {
    /// Builds the summary for a finished projection.
    pub fn from_result(result: &ProjectionResult) -> Self {
        let lifespan_years = result.lifespan_years();
        let average_yearly_savings = if lifespan_years > 0 {
            result.total_profit / f64::from(lifespan_years)
        } else {
            0.0
        };
        let tone = if result.is_profitable {
            ProfitTone::Profitable
        } else {
            ProfitTone::Unprofitable
        };
        Self {
            average_yearly_savings,
            lifespan_years,
            payback_month: result.payback_month,
            total_profit: result.total_profit,
            tone,
        }
    }

    /// "You save on average ... per year, over N years."
    pub fn average_line(&self, currency: &str) -> String {
        format!(
            "You save on average {currency}{:.2} per year, over {} years.",
            round2(self.average_yearly_savings),
            self.lifespan_years
        )
    }

    /// Payback sentence matching the tone.
    ///
    /// A profitable run can lack a payback month: the monthly series only
    /// carries a twelfth of the baseline year, so the cost may be covered
    /// only by the yearly total. That case still reads as paid back.
    pub fn payback_line(&self) -> String {
        match (self.tone, self.payback_month) {
            (ProfitTone::Profitable, Some(month)) => {
                format!("Your battery is paid back after {month} months.")
            }
            (ProfitTone::Profitable, None) => {
                "Your battery is paid back within its lifespan.".to_string()
            }
            (ProfitTone::Unprofitable, _) => "Your battery is not profitable.".to_string(),
        }
    }

    /// "Your total profit on the battery is ...", two decimals.
    pub fn profit_line(&self, currency: &str) -> String {
        format!(
            "Your total profit on the battery is {currency}{:.2}.",
            round2(self.total_profit)
        )
    }

    /// The three summary lines in display order.
    pub fn lines(&self, currency: &str) -> [String; 3] {
        [
            self.average_line(currency),
            self.payback_line(),
            self.profit_line(currency),
        ]
    }
}

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{InputSet, project};

    fn result(cost: f64, years: u32) -> ProjectionResult {
        project(&InputSet {
            yield_kwh: 10_000.0,
            self_new_kwh: 1200.0,
            price_per_kwh: 1.0,
            install_cost: cost,
            lifespan_years: years,
            ..InputSet::default()
        })
    }

    #[test]
    fn average_divides_total_profit_by_lifespan() {
        // 5 records of 1200 = 6000, minus 1000 = 5000 over 4 years
        let summary = Summary::from_result(&result(1000.0, 4));
        assert!((summary.average_yearly_savings - 1250.0).abs() < 1e-9);
        assert_eq!(summary.tone, ProfitTone::Profitable);
    }

    #[test]
    fn zero_lifespan_average_is_zero() {
        let summary = Summary::from_result(&result(100.0, 0));
        assert_eq!(summary.average_yearly_savings, 0.0);
        assert!(summary.total_profit.is_finite());
    }

    #[test]
    fn payback_line_reports_months() {
        let summary = Summary::from_result(&result(450.0, 1));
        assert_eq!(summary.payback_line(), "Your battery is paid back after 4 months.");
    }

    #[test]
    fn unprofitable_payback_line() {
        let summary = Summary::from_result(&result(1e9, 2));
        assert_eq!(summary.tone, ProfitTone::Unprofitable);
        assert_eq!(summary.payback_line(), "Your battery is not profitable.");
    }

    #[test]
    fn profitable_without_monthly_crossing_is_not_reported_unprofitable() {
        // lifespan 0: baseline year earns 1200, seed month only 100
        let run = result(500.0, 0);
        assert!(run.is_profitable);
        assert_eq!(run.payback_month, None);

        let summary = Summary::from_result(&run);
        assert_eq!(summary.tone, ProfitTone::Profitable);
        assert_eq!(
            summary.payback_line(),
            "Your battery is paid back within its lifespan."
        );
    }

    #[test]
    fn lines_use_currency_and_two_decimals() {
        let summary = Summary::from_result(&result(1000.0, 4));
        let [avg, _, profit] = summary.lines("€");
        assert!(avg.contains("€1250.00"), "{avg}");
        assert!(profit.contains("€5000.00"), "{profit}");
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(664.19999), 664.2);
        assert_eq!(round2(-1.005_1), -1.01);
        assert_eq!(round2(0.0), 0.0);
    }
}
