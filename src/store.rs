// 🗂️ Store - year → month → MonthRecord
// Single source of truth. Sparse: an absent key reads as an all-zero month.

use crate::error::{LedgerError, LedgerResult};
use crate::model::{Month, MonthRecord};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Read-only access to stored months.
///
/// The aggregator only ever sees this trait, never the persistence layer.
pub trait MonthLookup {
    fn get(&self, year: i32, month: Month) -> Option<&MonthRecord>;

    /// Total accessor: absent months read as the all-zero record
    fn get_or_default(&self, year: i32, month: Month) -> Cow<'_, MonthRecord> {
        match self.get(year, month) {
            Some(record) => Cow::Borrowed(record),
            None => Cow::Owned(MonthRecord::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Store {
    years: BTreeMap<i32, BTreeMap<Month, MonthRecord>>,
}

impl MonthLookup for Store {
    fn get(&self, year: i32, month: Month) -> Option<&MonthRecord> {
        self.years.get(&year).and_then(|months| months.get(&month))
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full replace of one month (never a partial patch)
    pub fn replace_month(&mut self, year: i32, month: Month, record: MonthRecord) {
        self.years.entry(year).or_default().insert(month, record);
    }

    pub fn clear_all(&mut self) {
        self.years.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.years.values().all(BTreeMap::is_empty)
    }

    /// Number of stored (year, month) records
    pub fn month_count(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    /// Every stored record in (year, month) order
    pub fn iter(&self) -> impl Iterator<Item = (i32, Month, &MonthRecord)> {
        self.years.iter().flat_map(|(year, months)| {
            months
                .iter()
                .map(move |(month, record)| (*year, *month, record))
        })
    }

    /// JSON form: `{"2024": {"0": {...}}}`
    pub fn serialize_all(&self) -> LedgerResult<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    /// Parse a persisted blob.
    ///
    /// Blank input is an empty store. Malformed fields inside a month are
    /// coerced (see `model`); unusable year/month entries are skipped. Only a
    /// blob that is not a JSON object at all is an error.
    pub fn load_all(blob: &str) -> LedgerResult<Store> {
        if blob.trim().is_empty() {
            return Ok(Store::new());
        }

        let root: Value =
            serde_json::from_str(blob).map_err(|e| LedgerError::Snapshot(e.to_string()))?;

        let Value::Object(years) = root else {
            return Err(LedgerError::Snapshot(
                "top-level value is not an object".to_string(),
            ));
        };

        let mut store = Store::new();

        for (year_key, months_value) in years {
            let Ok(year) = year_key.trim().parse::<i32>() else {
                warn!("Skipping stored year with non-numeric key {:?}", year_key);
                continue;
            };

            let Value::Object(months) = months_value else {
                warn!("Skipping year {}: value is not an object", year);
                continue;
            };

            for (month_key, record_value) in months {
                let month = match month_key.trim().parse::<u32>().map(Month::new) {
                    Ok(Ok(month)) => month,
                    _ => {
                        warn!("Skipping {}/{:?}: not a month index 0-11", year, month_key);
                        continue;
                    }
                };

                if !record_value.is_object() {
                    warn!("Skipping {}/{}: month value is not an object", year, month.index());
                    continue;
                }

                match serde_json::from_value::<MonthRecord>(record_value) {
                    Ok(record) => store.replace_month(year, month, record),
                    Err(e) => warn!("Skipping {}/{}: {}", year, month.index(), e),
                }
            }
        }

        debug!("Loaded {} month records", store.month_count());
        Ok(store)
    }
}
