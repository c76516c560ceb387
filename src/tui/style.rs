//! Color constants and axis helpers for the TUI.

use ratatui::style::Color;

use crate::projection::ProfitTone;

/// Cumulative savings line and affirmative profit color.
pub const PRIMARY: Color = Color::Rgb(0, 102, 0);
/// Install-cost threshold and payback marker.
pub const ACCENT: Color = Color::Rgb(255, 204, 0);
/// Warning color for an unprofitable installation.
pub const NOT_PROFITABLE: Color = Color::Rgb(153, 0, 0);
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlighted form row.
pub const SELECTED_BG: Color = Color::Blue;

pub fn tone_color(tone: ProfitTone) -> Color {
    match tone {
        ProfitTone::Profitable => PRIMARY,
        ProfitTone::Unprofitable => NOT_PROFITABLE,
    }
}

/// Y-axis bounds covering the cumulative series and the install cost,
/// anchored at zero, with 10% headroom.
pub fn savings_bounds_y(cumulative: &[(f64, f64)], install_cost: f64) -> [f64; 2] {
    let values = cumulative.iter().map(|&(_, y)| y).chain([install_cost, 0.0]);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(1.0);
    let pad = range * 0.1;
    let lo = if min < 0.0 { min - pad } else { 0.0 };
    [lo, max + pad]
}
