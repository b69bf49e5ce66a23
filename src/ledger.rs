// 💼 Ledger - Store + persistence behind one handle
// Every commit replaces one month in full and then persists the whole Store.

use crate::aggregator::Dashboard;
use crate::db;
use crate::error::{LedgerError, LedgerResult};
use crate::model::{parse_amount, LineItem, Month, MonthRecord, NetWorth};
use crate::selection::Selection;
use crate::store::{MonthLookup, Store};
use crate::theme::Theme;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// FORM CAPTURE
// ============================================================================

/// One editable row: label and amount exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRow {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub amount: String,
}

impl DraftRow {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }

    fn to_item(&self) -> LineItem {
        LineItem::new(self.label.clone(), parse_amount(&self.amount))
    }
}

/// Raw form contents for one month; coerced to a MonthRecord on commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthDraft {
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub cash: String,
    #[serde(default)]
    pub investments: String,
    #[serde(default)]
    pub income: Vec<DraftRow>,
    #[serde(default)]
    pub expenses: Vec<DraftRow>,
}

/// Zero shows as an empty field so the placeholder is visible
fn amount_text(amount: f64) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        amount.to_string()
    }
}

impl MonthDraft {
    pub fn from_record(record: &MonthRecord) -> Self {
        let rows = |items: &[LineItem]| -> Vec<DraftRow> {
            items
                .iter()
                .map(|item| DraftRow::new(item.label.clone(), amount_text(item.amount)))
                .collect()
        };

        Self {
            bank: amount_text(record.net_worth.bank),
            cash: amount_text(record.net_worth.cash),
            investments: amount_text(record.net_worth.investments),
            income: rows(&record.income),
            expenses: rows(&record.expenses),
        }
    }

    pub fn to_record(&self) -> MonthRecord {
        MonthRecord {
            net_worth: NetWorth::new(
                parse_amount(&self.bank),
                parse_amount(&self.cash),
                parse_amount(&self.investments),
            ),
            income: self.income.iter().map(DraftRow::to_item).collect(),
            expenses: self.expenses.iter().map(DraftRow::to_item).collect(),
        }
    }

    pub fn add_income_row(&mut self) {
        self.income.push(DraftRow::default());
    }

    pub fn add_expense_row(&mut self) {
        self.expenses.push(DraftRow::default());
    }
}

// ============================================================================
// TWO-STEP WIPE
// ============================================================================

/// Wipe gate: both steps must be confirmed before data is destroyed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WipeConfirmation {
    #[default]
    Idle,
    FirstConfirmed,
    Confirmed,
}

impl WipeConfirmation {
    /// Advance one step
    pub fn confirm(self) -> Self {
        match self {
            WipeConfirmation::Idle => WipeConfirmation::FirstConfirmed,
            WipeConfirmation::FirstConfirmed | WipeConfirmation::Confirmed => {
                WipeConfirmation::Confirmed
            }
        }
    }

    pub fn cancel(self) -> Self {
        WipeConfirmation::Idle
    }

    pub fn is_confirmed(self) -> bool {
        self == WipeConfirmation::Confirmed
    }
}

// ============================================================================
// LEDGER
// ============================================================================

pub struct Ledger {
    conn: Connection,
    store: Store,
    theme: Theme,
}

impl Ledger {
    /// Open (or create) the database file and load everything once
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!("Opened ledger database {:?}", path.as_ref());
        Self::from_connection(conn)
    }

    pub fn in_memory() -> LedgerResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> LedgerResult<Self> {
        db::setup_database(&conn)?;
        let store = db::load_store(&conn)?;
        let theme = db::load_theme(&conn)?;
        info!("Loaded {} month records, theme {}", store.month_count(), theme);

        Ok(Self { conn, store, theme })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn month(&self, year: i32, month: Month) -> Cow<'_, MonthRecord> {
        self.store.get_or_default(year, month)
    }

    /// Replace the month in full and persist the whole Store
    pub fn commit_month(&mut self, year: i32, month: Month, record: MonthRecord) -> LedgerResult<()> {
        let mut next = self.store.clone();
        next.replace_month(year, month, record);
        db::save_store(&self.conn, &next)?;

        self.store = next;
        info!("Committed {} {}", month, year);
        Ok(())
    }

    pub fn commit_draft(&mut self, year: i32, month: Month, draft: &MonthDraft) -> LedgerResult<MonthRecord> {
        let record = draft.to_record();
        self.commit_month(year, month, record.clone())?;
        Ok(record)
    }

    /// Replace the whole Store (import) and persist it
    pub fn replace_store(&mut self, store: Store) -> LedgerResult<()> {
        db::save_store(&self.conn, &store)?;
        info!("Replaced store with {} month records", store.month_count());
        self.store = store;
        Ok(())
    }

    pub fn dashboard(&self, selection: Selection, current_year: i32) -> Dashboard {
        Dashboard::compute(&self.store, selection, current_year)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> LedgerResult<()> {
        db::save_theme(&self.conn, theme)?;
        self.theme = theme;
        Ok(())
    }

    /// Use `theme` until the user has saved a preference of their own
    pub fn apply_default_theme(&mut self, theme: Theme) -> LedgerResult<()> {
        if db::get_value(&self.conn, db::THEME_KEY)?.is_none() {
            self.theme = theme;
        }
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> LedgerResult<Theme> {
        let next = self.theme.toggle();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Destroy all financial data. The theme survives.
    pub fn wipe(&mut self, confirmation: WipeConfirmation) -> LedgerResult<()> {
        if !confirmation.is_confirmed() {
            warn!("Wipe refused: {:?}", confirmation);
            return Err(LedgerError::WipeNotConfirmed);
        }

        db::clear_store(&self.conn)?;
        let removed = self.store.month_count();
        self.store.clear_all();
        warn!("Wiped all financial data ({} month records)", removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> Month {
        Month::new(2).unwrap()
    }

    fn sample_draft() -> MonthDraft {
        MonthDraft {
            bank: "1500.50".to_string(),
            cash: "".to_string(),
            investments: "abc".to_string(),
            income: vec![DraftRow::new("Salary", "2000"), DraftRow::new("", "")],
            expenses: vec![DraftRow::new("Rent", "650"), DraftRow::new("Coffee", "3,50")],
        }
    }

    #[test]
    fn test_draft_coercion() {
        let record = sample_draft().to_record();

        assert_eq!(record.net_worth, NetWorth::new(1500.5, 0.0, 0.0));
        assert_eq!(record.income.len(), 2);
        assert_eq!(record.income[1], LineItem::new("", 0.0));
        assert_eq!(record.expenses[1].amount, 3.0);
    }

    #[test]
    fn test_draft_from_record_blanks_zeros() {
        let record = MonthRecord {
            net_worth: NetWorth::new(0.0, 25.0, 0.0),
            income: vec![LineItem::new("Pay", 0.0)],
            expenses: vec![LineItem::new("Rent", 400.0)],
        };

        let draft = MonthDraft::from_record(&record);

        assert_eq!(draft.bank, "");
        assert_eq!(draft.cash, "25");
        assert_eq!(draft.income[0], DraftRow::new("Pay", ""));
        assert_eq!(draft.expenses[0], DraftRow::new("Rent", "400"));
        assert_eq!(draft.to_record(), record);
    }

    #[test]
    fn test_add_rows_append() {
        let mut draft = MonthDraft::default();
        draft.add_income_row();
        draft.add_expense_row();
        draft.add_expense_row();

        assert_eq!(draft.income.len(), 1);
        assert_eq!(draft.expenses.len(), 2);
    }

    #[test]
    fn test_commit_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let mut ledger = Ledger::open(&path).unwrap();
            ledger.commit_draft(2025, march(), &sample_draft()).unwrap();
            ledger.set_theme(Theme::Light).unwrap();
        }

        let reopened = Ledger::open(&path).unwrap();
        assert_eq!(reopened.month(2025, march()).net_worth_total(), 1500.5);
        assert_eq!(reopened.month(2025, march()).income[0].label, "Salary");
        assert_eq!(reopened.theme(), Theme::Light);
    }

    #[test]
    fn test_failed_commit_leaves_memory_unchanged() {
        let mut ledger = Ledger::in_memory().unwrap();
        ledger.commit_draft(2025, march(), &sample_draft()).unwrap();
        ledger.conn.pragma_update(None, "query_only", true).unwrap();

        let mut record = ledger.month(2025, march()).into_owned();
        record.net_worth = NetWorth::new(999.0, 0.0, 0.0);
        let april = march().next().unwrap();

        assert!(ledger.commit_month(2025, march(), record.clone()).is_err());
        assert!(ledger.commit_month(2025, april, record).is_err());

        assert_eq!(ledger.month(2025, march()).net_worth_total(), 1500.5);
        assert!(ledger.store().get(2025, april).is_none());
        assert_eq!(ledger.store().month_count(), 1);
    }

    #[test]
    fn test_import_replaces_everything_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let snapshot = r#"{
            "2024": {
                "11": {
                    "patrimonio": { "banco": 100, "efectivo": 20, "inversiones": 300 },
                    "ingresos": [ { "concepto": "Nomina", "valor": 1800 } ],
                    "gastos": [ { "concepto": "Alquiler", "valor": "650" } ]
                }
            }
        }"#;

        {
            let mut ledger = Ledger::open(&path).unwrap();
            ledger.commit_draft(2025, march(), &sample_draft()).unwrap();

            let store = Store::load_all(snapshot).unwrap();
            ledger.replace_store(store).unwrap();
        }

        let reopened = Ledger::open(&path).unwrap();
        let december = reopened.month(2024, Month::DECEMBER);

        assert_eq!(reopened.store().month_count(), 1);
        assert!(reopened.store().get(2025, march()).is_none());
        assert_eq!(december.net_worth_total(), 420.0);
        assert_eq!(december.income[0].label, "Nomina");
        assert_eq!(december.expenses[0].amount, 650.0);
    }

    #[test]
    fn test_wipe_requires_two_confirmations() {
        let mut ledger = Ledger::in_memory().unwrap();
        ledger.commit_draft(2025, march(), &sample_draft()).unwrap();

        let step = WipeConfirmation::default();
        assert!(matches!(ledger.wipe(step), Err(LedgerError::WipeNotConfirmed)));

        let step = step.confirm();
        assert!(matches!(ledger.wipe(step), Err(LedgerError::WipeNotConfirmed)));
        assert!(!ledger.store().is_empty());

        // Cancelling resets the gate
        assert_eq!(step.cancel(), WipeConfirmation::Idle);

        ledger.toggle_theme().unwrap();
        ledger.wipe(step.confirm()).unwrap();

        assert!(ledger.store().is_empty());
        assert_eq!(ledger.theme(), Theme::Light);
    }

    #[test]
    fn test_default_theme_only_without_saved_preference() {
        let mut ledger = Ledger::in_memory().unwrap();
        ledger.apply_default_theme(Theme::Light).unwrap();
        assert_eq!(ledger.theme(), Theme::Light);

        ledger.set_theme(Theme::Dark).unwrap();
        ledger.apply_default_theme(Theme::Light).unwrap();
        assert_eq!(ledger.theme(), Theme::Dark);
    }

    #[test]
    fn test_dashboard_reflects_commit() {
        let mut ledger = Ledger::in_memory().unwrap();
        let selection = Selection::new(2025, march(), 2026).unwrap();

        let before = ledger.dashboard(selection, 2026);
        ledger.commit_draft(2025, march(), &sample_draft()).unwrap();
        let after = ledger.dashboard(selection, 2026);

        assert_eq!(after.totals.income_sum, 2000.0);
        assert_eq!(after.totals.expense_sum, 653.0);
        assert!(after.changes_from(&before).totals);
    }
}
