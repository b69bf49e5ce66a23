// 📅 Selection - which (year, month) is being viewed and edited
// Years are limited to the ten most recent, current year included.

use crate::aggregator::DECADE_YEARS;
use crate::error::{LedgerError, LedgerResult};
use crate::model::Month;
use chrono::{Datelike, Local};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    year: i32,
    month: Month,
}

/// Current calendar year and month (local time)
pub fn today() -> (i32, Month) {
    let now = Local::now();
    // month0() is always 0-11
    let month = Month::new(now.month0()).unwrap_or(Month::JANUARY);
    (now.year(), month)
}

/// Selectable years, newest first
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..DECADE_YEARS).map(|offset| current_year - offset).collect()
}

impl Selection {
    pub fn new(year: i32, month: Month, current_year: i32) -> LedgerResult<Self> {
        let first = current_year - (DECADE_YEARS - 1);
        if year < first || year > current_year {
            return Err(LedgerError::YearOutOfRange {
                year,
                first,
                last: current_year,
            });
        }
        Ok(Self { year, month })
    }

    /// Default selection: this month of this year
    pub fn current() -> Self {
        let (year, month) = today();
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Next month, staying on December at the end of the year
    pub fn next_month(self) -> Self {
        Self {
            month: self.month.next().unwrap_or(self.month),
            ..self
        }
    }

    pub fn previous_month(self) -> Self {
        Self {
            month: self.month.previous().unwrap_or(self.month),
            ..self
        }
    }

    /// Move the year by `offset`, clamped to the selectable window
    pub fn shift_year(self, offset: i32, current_year: i32) -> Self {
        let first = current_year - (DECADE_YEARS - 1);
        Self {
            year: (self.year + offset).clamp(first, current_year),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_window() {
        let month = Month::new(4).unwrap();

        assert!(Selection::new(2026, month, 2026).is_ok());
        assert!(Selection::new(2017, month, 2026).is_ok());
        assert!(matches!(
            Selection::new(2016, month, 2026),
            Err(LedgerError::YearOutOfRange { first: 2017, last: 2026, .. })
        ));
        assert!(Selection::new(2027, month, 2026).is_err());
    }

    #[test]
    fn test_year_options_newest_first() {
        let years = year_options(2026);

        assert_eq!(years.len(), 10);
        assert_eq!(years.first(), Some(&2026));
        assert_eq!(years.last(), Some(&2017));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let selection = Selection::new(2026, Month::DECEMBER, 2026).unwrap();

        assert_eq!(selection.next_month().month(), Month::DECEMBER);
        assert_eq!(selection.previous_month().month().index(), 10);
        assert_eq!(selection.shift_year(1, 2026).year(), 2026);
        assert_eq!(selection.shift_year(-20, 2026).year(), 2017);

        let january = Selection::new(2020, Month::JANUARY, 2026).unwrap();
        assert_eq!(january.previous_month().month(), Month::JANUARY);
    }
}
