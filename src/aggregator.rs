// 📊 Aggregator - every number and chart series derived from the Store
// Pure functions over MonthLookup. Missing data is zero, never an error.

use crate::model::Month;
use crate::selection::Selection;
use crate::store::MonthLookup;
use serde::Serialize;

/// Years shown in the long-horizon chart (current year included)
pub const DECADE_YEARS: i32 = 10;

// ============================================================================
// MONTH TOTALS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthTotals {
    pub income_sum: f64,
    pub expense_sum: f64,
    pub net_worth_sum: f64,
    /// income_sum - expense_sum
    pub balance: f64,
}

pub fn month_totals<S: MonthLookup + ?Sized>(store: &S, year: i32, month: Month) -> MonthTotals {
    let record = store.get_or_default(year, month);
    let income_sum = record.income_total();
    let expense_sum = record.expense_total();

    MonthTotals {
        income_sum,
        expense_sum,
        net_worth_sum: record.net_worth_total(),
        balance: income_sum - expense_sum,
    }
}

/// Net worth of one month; absent months are 0
pub fn net_worth_at<S: MonthLookup + ?Sized>(store: &S, year: i32, month: Month) -> f64 {
    store
        .get(year, month)
        .map(|record| record.net_worth_total())
        .unwrap_or(0.0)
}

// ============================================================================
// MONTH-OVER-MONTH DELTA
// ============================================================================

/// Change in net worth against the previous month of the same year.
///
/// January is always 0: there is no lookback into December of the prior year.
pub fn month_over_month_delta<S: MonthLookup + ?Sized>(store: &S, year: i32, month: Month) -> f64 {
    match month.previous() {
        None => 0.0,
        Some(previous) => net_worth_at(store, year, month) - net_worth_at(store, year, previous),
    }
}

/// Sign of a delta as shown to the user (zero counts as a gain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Gain,
    Loss,
}

impl Polarity {
    pub fn of(delta: f64) -> Self {
        if delta >= 0.0 {
            Polarity::Gain
        } else {
            Polarity::Loss
        }
    }
}

// ============================================================================
// CHART SERIES
// ============================================================================

/// Two-value series for the income/expense split chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct IncomeExpenseSplit {
    pub income: f64,
    pub expenses: f64,
}

pub fn income_expense_split<S: MonthLookup + ?Sized>(
    store: &S,
    year: i32,
    month: Month,
) -> IncomeExpenseSplit {
    let totals = month_totals(store, year, month);
    IncomeExpenseSplit {
        income: totals.income_sum,
        expenses: totals.expense_sum,
    }
}

/// Net worth for each month of `year`. Gaps are 0, never carried forward.
pub fn year_series<S: MonthLookup + ?Sized>(store: &S, year: i32) -> [f64; 12] {
    let mut series = [0.0; 12];
    for month in Month::all() {
        series[month.index()] = net_worth_at(store, year, month);
    }
    series
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub value: f64,
}

/// Year-end net worth for `current_year - 9 ..= current_year`.
///
/// A year's value is the net worth of its latest month that has a record,
/// found by scanning December back to January. A stored month counts even
/// when its balances are all zero.
pub fn decade_series<S: MonthLookup + ?Sized>(store: &S, current_year: i32) -> Vec<YearPoint> {
    let first = current_year - (DECADE_YEARS - 1);

    (first..=current_year)
        .map(|year| {
            let value = Month::all()
                .rev()
                .find_map(|month| store.get(year, month))
                .map(|record| record.net_worth_total())
                .unwrap_or(0.0);
            YearPoint { year, value }
        })
        .collect()
}

// ============================================================================
// DASHBOARD (recompute + diff)
// ============================================================================

/// Everything the views render for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selection: Selection,
    pub totals: MonthTotals,
    pub delta: f64,
    pub polarity: Polarity,
    pub split: IncomeExpenseSplit,
    pub year_series: [f64; 12],
    pub decade_series: Vec<YearPoint>,
}

/// Which parts of a dashboard differ from a previous computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardChanges {
    pub totals: bool,
    pub split: bool,
    pub year_series: bool,
    pub decade_series: bool,
}

impl DashboardChanges {
    pub fn any(&self) -> bool {
        self.totals || self.split || self.year_series || self.decade_series
    }

    pub fn all() -> Self {
        Self {
            totals: true,
            split: true,
            year_series: true,
            decade_series: true,
        }
    }
}

impl Dashboard {
    pub fn compute<S: MonthLookup + ?Sized>(store: &S, selection: Selection, current_year: i32) -> Self {
        let (year, month) = (selection.year(), selection.month());
        let delta = month_over_month_delta(store, year, month);

        Dashboard {
            selection,
            totals: month_totals(store, year, month),
            delta,
            polarity: Polarity::of(delta),
            split: income_expense_split(store, year, month),
            year_series: year_series(store, year),
            decade_series: decade_series(store, current_year),
        }
    }

    /// Compare against the dashboard that is currently on screen
    pub fn changes_from(&self, previous: &Dashboard) -> DashboardChanges {
        DashboardChanges {
            totals: self.selection != previous.selection
                || self.totals != previous.totals
                || self.delta != previous.delta,
            split: self.split != previous.split,
            year_series: self.year_series != previous.year_series,
            decade_series: self.decade_series != previous.decade_series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, MonthRecord, NetWorth};
    use crate::store::Store;

    fn month(index: u32) -> Month {
        Month::new(index).unwrap()
    }

    fn with_net_worth(bank: f64, cash: f64, investments: f64) -> MonthRecord {
        MonthRecord {
            net_worth: NetWorth::new(bank, cash, investments),
            ..MonthRecord::default()
        }
    }

    /// 2024/Jan: bank 100, Pay 1000, Rent 400
    fn scenario_store() -> Store {
        let mut store = Store::new();
        store.replace_month(
            2024,
            month(0),
            MonthRecord {
                net_worth: NetWorth::new(100.0, 0.0, 0.0),
                income: vec![LineItem::new("Pay", 1000.0)],
                expenses: vec![LineItem::new("Rent", 400.0)],
            },
        );
        store
    }

    #[test]
    fn test_totals_for_absent_month_are_zero() {
        let store = scenario_store();

        for m in Month::all() {
            assert_eq!(month_totals(&store, 2019, m), MonthTotals::default());
        }
        assert_eq!(month_totals(&store, 2024, month(5)), MonthTotals::default());
    }

    #[test]
    fn test_scenario_month_totals() {
        let totals = month_totals(&scenario_store(), 2024, month(0));

        assert_eq!(
            totals,
            MonthTotals {
                income_sum: 1000.0,
                expense_sum: 400.0,
                net_worth_sum: 100.0,
                balance: 600.0,
            }
        );
    }

    #[test]
    fn test_balance_with_empty_lists() {
        let mut store = Store::new();
        store.replace_month(
            2024,
            month(2),
            MonthRecord {
                expenses: vec![LineItem::new("Car", 250.0), LineItem::new("Gym", 30.0)],
                ..MonthRecord::default()
            },
        );
        store.replace_month(
            2024,
            month(3),
            MonthRecord {
                income: vec![LineItem::new("Pay", 900.0)],
                ..MonthRecord::default()
            },
        );

        assert_eq!(month_totals(&store, 2024, month(2)).balance, -280.0);
        assert_eq!(month_totals(&store, 2024, month(3)).balance, 900.0);
    }

    #[test]
    fn test_january_delta_is_always_zero() {
        let mut store = Store::new();
        store.replace_month(2023, month(11), with_net_worth(5000.0, 0.0, 0.0));
        store.replace_month(2024, month(0), with_net_worth(100.0, 0.0, 0.0));

        assert_eq!(month_over_month_delta(&store, 2024, Month::JANUARY), 0.0);
        assert_eq!(month_over_month_delta(&Store::new(), 2024, Month::JANUARY), 0.0);
    }

    #[test]
    fn test_scenario_delta_against_missing_month() {
        // Feb is absent (0) and Jan holds 100
        assert_eq!(month_over_month_delta(&scenario_store(), 2024, month(1)), -100.0);
    }

    #[test]
    fn test_delta_positive_and_negative() {
        let mut store = Store::new();
        store.replace_month(2024, month(3), with_net_worth(1000.0, 50.0, 200.0));
        store.replace_month(2024, month(4), with_net_worth(1100.0, 50.0, 250.0));
        store.replace_month(2024, month(5), with_net_worth(900.0, 0.0, 250.0));

        assert_eq!(month_over_month_delta(&store, 2024, month(4)), 150.0);
        assert_eq!(month_over_month_delta(&store, 2024, month(5)), -250.0);
        // Previous month (Mar) absent contributes 0
        assert_eq!(month_over_month_delta(&store, 2024, month(3)), 1250.0);

        assert_eq!(Polarity::of(150.0), Polarity::Gain);
        assert_eq!(Polarity::of(0.0), Polarity::Gain);
        assert_eq!(Polarity::of(-250.0), Polarity::Loss);
    }

    #[test]
    fn test_year_series_is_zero_filled() {
        let mut store = Store::new();
        store.replace_month(2024, month(5), with_net_worth(300.0, 20.0, 0.0));

        let series = year_series(&store, 2024);

        assert_eq!(series.len(), 12);
        for (i, value) in series.iter().enumerate() {
            if i == 5 {
                assert_eq!(*value, 320.0);
            } else {
                assert_eq!(*value, 0.0, "month {} should not carry a neighbour's value", i);
            }
        }
        assert_eq!(year_series(&store, 2023), [0.0; 12]);
    }

    #[test]
    fn test_decade_series_window() {
        let series = decade_series(&Store::new(), 2026);

        assert_eq!(series.len(), 10);
        let years: Vec<i32> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, (2017..=2026).collect::<Vec<_>>());
        assert!(series.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_decade_series_takes_latest_recorded_month() {
        let mut store = Store::new();
        store.replace_month(2022, month(3), with_net_worth(100.0, 0.0, 0.0));
        store.replace_month(2022, month(7), with_net_worth(700.0, 0.0, 7.0));
        store.replace_month(2015, month(11), with_net_worth(999.0, 0.0, 0.0));

        let series = decade_series(&store, 2026);
        let value_for = |year: i32| series.iter().find(|p| p.year == year).map(|p| p.value);

        assert_eq!(value_for(2022), Some(707.0));
        assert_eq!(value_for(2023), Some(0.0));
        // Outside the window
        assert_eq!(value_for(2015), None);
    }

    #[test]
    fn test_decade_series_stops_at_stored_zero_month() {
        let mut store = Store::new();
        store.replace_month(2024, month(2), with_net_worth(500.0, 0.0, 0.0));
        store.replace_month(2024, month(9), MonthRecord::default());

        let series = decade_series(&store, 2024);

        assert_eq!(series.last(), Some(&YearPoint { year: 2024, value: 0.0 }));
    }

    #[test]
    fn test_dashboard_compute_and_changes() {
        let mut store = scenario_store();
        let selection = Selection::new(2024, month(0), 2026).unwrap();

        let before = Dashboard::compute(&store, selection, 2026);
        assert_eq!(before.totals.balance, 600.0);
        assert_eq!(before.split, IncomeExpenseSplit { income: 1000.0, expenses: 400.0 });
        assert_eq!(before.year_series[0], 100.0);
        assert_eq!(before.polarity, Polarity::Gain);

        let unchanged = Dashboard::compute(&store, selection, 2026);
        assert!(!unchanged.changes_from(&before).any());

        // Editing a different month of the same year only moves the charts
        store.replace_month(2024, month(6), with_net_worth(50.0, 0.0, 0.0));
        let after = Dashboard::compute(&store, selection, 2026);
        let changes = after.changes_from(&before);

        assert!(!changes.totals);
        assert!(!changes.split);
        assert!(changes.year_series);
        assert!(changes.decade_series);
    }
}
