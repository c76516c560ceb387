//! Calculator form state and the field-derivation rules that keep it consistent.
//!
//! Editing one field may rewrite others: power and yield are tied by
//! [`YIELD_PER_WATT`], and each self-consumption pair (percentage and
//! absolute kWh) is kept in step with the yield. [`sync`] applies those rules
//! as a pure function of the edited field and the current state.

use std::fmt;
use std::str::FromStr;

use crate::projection::{InputSet, MAX_LIFESPAN_YEARS, finite_or_zero};

/// Maximum installation power accepted by the calculator (W).
pub const MAX_POWER_W: f64 = 10_000.0;

/// Annual yield per installed watt (kWh/year per W).
pub const YIELD_PER_WATT: f64 = 0.9;

/// An editable calculator field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Power,
    Yield,
    SelfOldPct,
    SelfOld,
    SelfNewPct,
    SelfNew,
    PriceKwh,
    InstallCost,
    PriceInc,
    Lifespan,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 10] = [
        Field::Power,
        Field::Yield,
        Field::SelfOldPct,
        Field::SelfOld,
        Field::SelfNewPct,
        Field::SelfNew,
        Field::PriceKwh,
        Field::InstallCost,
        Field::PriceInc,
        Field::Lifespan,
    ];

    /// Stable identifier, also accepted by [`Field::from_str`].
    pub fn id(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Yield => "yield",
            Self::SelfOldPct => "self_old_pct",
            Self::SelfOld => "self_old",
            Self::SelfNewPct => "self_new_pct",
            Self::SelfNew => "self_new",
            Self::PriceKwh => "price_kwh",
            Self::InstallCost => "install_cost",
            Self::PriceInc => "price_inc",
            Self::Lifespan => "lifespan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Power => "Power",
            Self::Yield => "Yield",
            Self::SelfOldPct => "Self-use before",
            Self::SelfOld => "Self-use before",
            Self::SelfNewPct => "Self-use after",
            Self::SelfNew => "Self-use after",
            Self::PriceKwh => "Price",
            Self::InstallCost => "Install cost",
            Self::PriceInc => "Price increase",
            Self::Lifespan => "Lifespan",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Power => "W",
            Self::Yield | Self::SelfOld | Self::SelfNew => "kWh/yr",
            Self::SelfOldPct | Self::SelfNewPct => "%",
            Self::PriceKwh => "/kWh",
            Self::InstallCost => "",
            Self::PriceInc => "%/yr",
            Self::Lifespan => "yr",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when parsing an unknown field identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field \"{0}\"")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Non-blocking notice produced while bringing the form into a valid state.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Power exceeded [`MAX_POWER_W`] and was clamped.
    PowerClamped { requested_w: f64, max_w: f64 },
    /// Lifespan exceeded [`MAX_LIFESPAN_YEARS`] and was capped.
    LifespanClamped { requested_years: f64, max_years: u32 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerClamped { requested_w, max_w } => write!(
                f,
                "power {requested_w} W exceeds the maximum installation capacity, clamped to {max_w} W"
            ),
            Self::LifespanClamped {
                requested_years,
                max_years,
            } => write!(
                f,
                "lifespan {requested_years} years exceeds the maximum, capped to {max_years} years"
            ),
        }
    }
}

/// Parses form text as a number; anything unparsable or non-finite is 0.
pub fn parse_numeric(text: &str) -> f64 {
    text.trim().parse::<f64>().map_or(0.0, finite_or_zero)
}

/// Raw values of every calculator field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub power_w: f64,
    pub yield_kwh: f64,
    pub self_old_pct: f64,
    pub self_old_kwh: f64,
    pub self_new_pct: f64,
    pub self_new_kwh: f64,
    pub price_per_kwh: f64,
    pub install_cost: f64,
    pub price_increase_pct: f64,
    pub lifespan_years: f64,
}

impl Default for FormState {
    /// The calculator's starting values, already synced.
    fn default() -> Self {
        Self {
            power_w: 4000.0,
            yield_kwh: 3600.0,
            self_old_pct: 30.0,
            self_old_kwh: 1080.0,
            self_new_pct: 75.0,
            self_new_kwh: 2700.0,
            price_per_kwh: 0.41,
            install_cost: 4000.0,
            price_increase_pct: 4.0,
            lifespan_years: 12.0,
        }
    }
}

/// State after applying the derivation rules, plus any notices raised.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    pub state: FormState,
    pub advisories: Vec<Advisory>,
}

/// Applies the derivation rules for an edit of `changed` to `state`.
///
/// `changed = None` is a full refresh: absolute self-consumption values are
/// recomputed from their percentages and yield is left as entered unless
/// power has to be clamped.
pub fn sync(changed: Option<Field>, state: &FormState) -> SyncOutcome {
    let mut next = state.clone();
    let mut advisories = Vec::new();

    match changed {
        Some(Field::Power) => next.yield_kwh = next.power_w * YIELD_PER_WATT,
        Some(Field::Yield) => next.power_w = next.yield_kwh / YIELD_PER_WATT,
        _ => {}
    }

    // yield always follows the clamped power, whichever side was edited
    if next.power_w > MAX_POWER_W {
        advisories.push(Advisory::PowerClamped {
            requested_w: next.power_w,
            max_w: MAX_POWER_W,
        });
        next.power_w = MAX_POWER_W;
        next.yield_kwh = MAX_POWER_W * YIELD_PER_WATT;
    }

    if changed == Some(Field::SelfOld) {
        next.self_old_pct = share_pct(next.self_old_kwh, next.yield_kwh);
    } else {
        next.self_old_kwh = next.yield_kwh * next.self_old_pct / 100.0;
    }

    if changed == Some(Field::SelfNew) {
        next.self_new_pct = share_pct(next.self_new_kwh, next.yield_kwh);
    } else {
        next.self_new_kwh = next.yield_kwh * next.self_new_pct / 100.0;
    }

    let lifespan = finite_or_zero(next.lifespan_years).max(0.0).trunc();
    if lifespan > f64::from(MAX_LIFESPAN_YEARS) {
        advisories.push(Advisory::LifespanClamped {
            requested_years: lifespan,
            max_years: MAX_LIFESPAN_YEARS,
        });
        next.lifespan_years = f64::from(MAX_LIFESPAN_YEARS);
    } else {
        next.lifespan_years = lifespan;
    }

    SyncOutcome {
        state: next,
        advisories,
    }
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn share_pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        finite_or_zero(part / whole * 100.0)
    }
}

impl FormState {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Power => self.power_w,
            Field::Yield => self.yield_kwh,
            Field::SelfOldPct => self.self_old_pct,
            Field::SelfOld => self.self_old_kwh,
            Field::SelfNewPct => self.self_new_pct,
            Field::SelfNew => self.self_new_kwh,
            Field::PriceKwh => self.price_per_kwh,
            Field::InstallCost => self.install_cost,
            Field::PriceInc => self.price_increase_pct,
            Field::Lifespan => self.lifespan_years,
        }
    }

    /// Stores `value` in `field`; non-finite values become 0.
    pub fn set(&mut self, field: Field, value: f64) {
        let value = finite_or_zero(value);
        let slot = match field {
            Field::Power => &mut self.power_w,
            Field::Yield => &mut self.yield_kwh,
            Field::SelfOldPct => &mut self.self_old_pct,
            Field::SelfOld => &mut self.self_old_kwh,
            Field::SelfNewPct => &mut self.self_new_pct,
            Field::SelfNew => &mut self.self_new_kwh,
            Field::PriceKwh => &mut self.price_per_kwh,
            Field::InstallCost => &mut self.install_cost,
            Field::PriceInc => &mut self.price_increase_pct,
            Field::Lifespan => &mut self.lifespan_years,
        };
        *slot = value;
    }

    /// [`sync`] applied to this state.
    pub fn apply_edit(&self, changed: Option<Field>) -> SyncOutcome {
        sync(changed, self)
    }

    /// Sets `field` from raw text and re-syncs the form as an edit of it.
    pub fn edit(&mut self, field: Field, text: &str) -> Vec<Advisory> {
        self.set(field, parse_numeric(text));
        let outcome = self.apply_edit(Some(field));
        *self = outcome.state;
        outcome.advisories
    }

    /// Engine input for the current form values.
    ///
    /// Call after [`sync`] so power and lifespan are already within range.
    pub fn input_set(&self) -> InputSet {
        InputSet {
            power_w: self.power_w,
            yield_kwh: self.yield_kwh,
            self_old_pct: self.self_old_pct,
            self_old_kwh: self.self_old_kwh,
            self_new_pct: self.self_new_pct,
            self_new_kwh: self.self_new_kwh,
            price_per_kwh: self.price_per_kwh,
            install_cost: self.install_cost,
            price_increase_pct: self.price_increase_pct,
            lifespan_years: finite_or_zero(self.lifespan_years).max(0.0) as u32,
        }
    }
}
