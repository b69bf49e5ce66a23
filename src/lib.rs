// Net Worth Tracker - Core Library
// Exposes all modules for use in the terminal app, API server, and tests

pub mod model;
pub mod store;
pub mod aggregator;
pub mod selection;
pub mod theme;
pub mod db;
pub mod ledger;
pub mod export;
pub mod report;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use model::{parse_amount, LineItem, Month, MonthRecord, NetWorth};
pub use store::{MonthLookup, Store};
pub use aggregator::{
    decade_series, income_expense_split, month_over_month_delta, month_totals, year_series,
    Dashboard, DashboardChanges, IncomeExpenseSplit, MonthTotals, Polarity, YearPoint,
};
pub use selection::{today, year_options, Selection};
pub use theme::{Palette, Theme};
pub use ledger::{DraftRow, Ledger, MonthDraft, WipeConfirmation};
pub use config::{Config, Overrides};
pub use error::{LedgerError, LedgerResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
