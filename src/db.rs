// 💾 Ledger database - SQLite key/value persistence for the Store and theme

use crate::error::LedgerResult;
use crate::store::Store;
use crate::theme::Theme;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

/// Key holding the JSON snapshot of the whole Store
pub const FINANCE_DATA_KEY: &str = "finance_data";

/// Key holding the theme preference ("dark" / "light")
pub const THEME_KEY: &str = "theme";

pub fn setup_database(conn: &Connection) -> LedgerResult<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // ==========================================================================
    // Key/value table: one named blob per key, whole-value overwrites
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> LedgerResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

pub fn put_value(conn: &Connection, key: &str, value: &str) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn delete_value(conn: &Connection, key: &str) -> LedgerResult<bool> {
    let removed = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(removed > 0)
}

// ============================================================================
// Store snapshot
// ============================================================================

/// Load the Store (empty when nothing was saved yet)
pub fn load_store(conn: &Connection) -> LedgerResult<Store> {
    match get_value(conn, FINANCE_DATA_KEY)? {
        Some(blob) => Store::load_all(&blob),
        None => Ok(Store::new()),
    }
}

/// Overwrite the persisted snapshot with the full Store
pub fn save_store(conn: &Connection, store: &Store) -> LedgerResult<()> {
    let blob = store.serialize_all()?;
    put_value(conn, FINANCE_DATA_KEY, &blob)?;
    debug!("Saved snapshot ({} bytes, {} months)", blob.len(), store.month_count());
    Ok(())
}

/// Remove the financial data. The theme is kept.
pub fn clear_store(conn: &Connection) -> LedgerResult<()> {
    delete_value(conn, FINANCE_DATA_KEY)?;
    Ok(())
}

// ============================================================================
// Theme preference
// ============================================================================

pub fn load_theme(conn: &Connection) -> LedgerResult<Theme> {
    match get_value(conn, THEME_KEY)? {
        Some(raw) => Ok(raw.parse().unwrap_or_else(|e: String| {
            warn!("Ignoring stored theme: {}", e);
            Theme::default()
        })),
        None => Ok(Theme::default()),
    }
}

pub fn save_theme(conn: &Connection, theme: Theme) -> LedgerResult<()> {
    put_value(conn, THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::model::{LineItem, Month, MonthRecord, NetWorth};
    use crate::store::MonthLookup;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_empty_database_loads_empty_store() {
        let conn = open();

        assert!(load_store(&conn).unwrap().is_empty());
        assert_eq!(load_theme(&conn).unwrap(), Theme::Dark);
        assert!(get_value(&conn, THEME_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_store() {
        let conn = open();
        let march = Month::new(2).unwrap();

        let mut store = Store::new();
        store.replace_month(
            2025,
            march,
            MonthRecord {
                net_worth: NetWorth::new(1200.0, 80.0, 5000.0),
                income: vec![LineItem::new("Salary", 2100.0)],
                expenses: vec![LineItem::new("Rent", 700.0), LineItem::new("Power", 55.2)],
            },
        );

        save_store(&conn, &store).unwrap();
        // Second save overwrites, never duplicates
        save_store(&conn, &store).unwrap();

        let loaded = load_store(&conn).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.get(2025, march).unwrap().expenses[1].label, "Power");
        assert!(get_value(&conn, THEME_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_store_keeps_theme() {
        let conn = open();
        let mut store = Store::new();
        store.replace_month(2025, Month::JANUARY, MonthRecord::default());

        save_store(&conn, &store).unwrap();
        save_theme(&conn, Theme::Light).unwrap();
        clear_store(&conn).unwrap();

        assert!(load_store(&conn).unwrap().is_empty());
        assert_eq!(load_theme(&conn).unwrap(), Theme::Light);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_dark() {
        let conn = open();
        put_value(&conn, THEME_KEY, "sepia").unwrap();

        assert_eq!(load_theme(&conn).unwrap(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let conn = open();
        put_value(&conn, FINANCE_DATA_KEY, "{broken").unwrap();

        assert!(matches!(load_store(&conn), Err(LedgerError::Snapshot(_))));
        // The blob is left in place for recovery
        assert_eq!(get_value(&conn, FINANCE_DATA_KEY).unwrap().as_deref(), Some("{broken"));
    }
}
