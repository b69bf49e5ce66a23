//! Plain-text rendering of a dashboard.
//!
//! Used by the `show` command. Amounts use two decimals and the configured
//! currency suffix.

use crate::aggregator::{Dashboard, Polarity};
use std::fmt::Write;

/// `1234.5` → `1234.50€`
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{:.2}{}", amount, currency)
}

/// Signed delta: `+12.00` for gains (including zero), `-3.50` for losses
pub fn format_delta(delta: f64) -> String {
    match Polarity::of(delta) {
        // abs() keeps -0.0 from printing as "+-0.00"
        Polarity::Gain => format!("+{:.2}", delta.abs()),
        Polarity::Loss => format!("{:.2}", delta),
    }
}

pub fn render_dashboard(dashboard: &Dashboard, currency: &str) -> String {
    let mut out = String::new();
    let selection = dashboard.selection;
    let totals = &dashboard.totals;

    // Writing to a String cannot fail
    let _ = writeln!(out, "{} {}", selection.month(), selection.year());
    let _ = writeln!(out, "{}", "─".repeat(32));
    let _ = writeln!(out, "Income:     {:>16}", format_money(totals.income_sum, currency));
    let _ = writeln!(out, "Expenses:   {:>16}", format_money(totals.expense_sum, currency));
    let _ = writeln!(out, "Balance:    {:>16}", format_money(totals.balance, currency));
    let _ = writeln!(out, "Net worth:  {:>16}", format_money(totals.net_worth_sum, currency));
    let _ = writeln!(out, "vs. prev:   {:>16}", format_delta(dashboard.delta));

    let _ = writeln!(out, "\nNet worth by month ({})", selection.year());
    for (label, value) in crate::model::Month::all()
        .map(|m| m.label())
        .zip(dashboard.year_series.iter())
    {
        let _ = writeln!(out, "  {}  {:>14.2}", label, value);
    }

    let _ = writeln!(out, "\nYear-end net worth");
    for point in &dashboard.decade_series {
        let _ = writeln!(out, "  {}  {:>14.2}", point.year, point.value);
    }

    out
}
