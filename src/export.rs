// 📤 CSV Export - flatten the Store into one row per balance or line item

use crate::error::LedgerResult;
use crate::store::Store;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize, PartialEq)]
pub struct ExportRow<'a> {
    pub year: i32,
    pub month: usize,
    pub month_label: &'static str,
    pub kind: &'static str,
    pub label: &'a str,
    pub amount: f64,
}

/// Rows in (year, month) order; within a month: balances, income, expenses
pub fn export_rows(store: &Store) -> Vec<ExportRow<'_>> {
    let mut rows = Vec::new();

    for (year, month, record) in store.iter() {
        let row = |kind: &'static str, label: &'static str, amount: f64| ExportRow {
            year,
            month: month.index(),
            month_label: month.label(),
            kind,
            label,
            amount,
        };

        rows.push(row("bank", "", record.net_worth.bank));
        rows.push(row("cash", "", record.net_worth.cash));
        rows.push(row("investments", "", record.net_worth.investments));

        for (kind, items) in [("income", &record.income), ("expense", &record.expenses)] {
            rows.extend(items.iter().map(|item| ExportRow {
                year,
                month: month.index(),
                month_label: month.label(),
                kind,
                label: item.label.as_str(),
                amount: item.amount,
            }));
        }
    }

    rows
}

pub fn write_csv<W: Write>(store: &Store, writer: W) -> LedgerResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    let rows = export_rows(store);

    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    Ok(rows.len())
}

pub fn write_csv_file(store: &Store, path: &Path) -> LedgerResult<usize> {
    let file = std::fs::File::create(path)?;
    write_csv(store, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, Month, MonthRecord, NetWorth};

    fn sample_store() -> Store {
        let mut store = Store::new();
        store.replace_month(
            2024,
            Month::new(1).unwrap(),
            MonthRecord {
                net_worth: NetWorth::new(100.0, 5.0, 0.0),
                income: vec![LineItem::new("Pay", 1000.0)],
                expenses: vec![LineItem::new("Rent, flat", 400.0)],
            },
        );
        store
    }

    #[test]
    fn test_export_rows_order() {
        let store = sample_store();
        let rows = export_rows(&store);
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind).collect();

        assert_eq!(kinds, vec!["bank", "cash", "investments", "income", "expense"]);
        assert_eq!(rows[3].label, "Pay");
        assert_eq!(rows[4].month_label, "Feb");
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        let written = write_csv(&sample_store(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(written, 5);
        assert!(text.starts_with("year,month,month_label,kind,label,amount\n"));
        assert!(text.contains("2024,1,Feb,income,Pay,1000.0"));
        // Labels containing commas are quoted
        assert!(text.contains("\"Rent, flat\""));
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");

        let written = write_csv_file(&Store::new(), &path).unwrap();

        assert_eq!(written, 0);
        assert!(path.exists());
    }
}
