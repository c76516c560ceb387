//! Shared fixtures for integration tests.

#![allow(dead_code)]

use battery_payback::form::{Field, FormState};
use battery_payback::projection::InputSet;

/// Absolute tolerance for money comparisons.
pub const EPS: f64 = 1e-6;

/// Default calculator form (4 kW, 30% -> 75% self-use, 0.41/kWh, 4000 cost,
/// 4%/yr, 12 years).
pub fn default_form() -> FormState {
    FormState::default()
}

/// Scenario A input, built through the form as a user would enter it.
pub fn scenario_a_input() -> InputSet {
    let mut form = default_form();
    form.edit(Field::Power, "4000");
    form.edit(Field::SelfOldPct, "30");
    form.edit(Field::SelfNewPct, "75");
    form.input_set()
}

/// Input with a fixed annual energy gain and otherwise simple economics.
pub fn simple_input(gain_kwh: f64, price: f64, cost: f64, inc_pct: f64, years: u32) -> InputSet {
    InputSet {
        yield_kwh: 100_000.0,
        self_old_kwh: 0.0,
        self_new_kwh: gain_kwh,
        price_per_kwh: price,
        install_cost: cost,
        price_increase_pct: inc_pct,
        lifespan_years: years,
        ..InputSet::default()
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}
