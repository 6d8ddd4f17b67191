use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, Result};

/// Check whether a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check whether a table has a given column.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `users` table.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            email      TEXT NOT NULL UNIQUE,
            name       TEXT NOT NULL,
            role       TEXT NOT NULL DEFAULT 'user' CHECK(role IN ('user','admin')),
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `entries` table with the modern schema (including the
/// change-history column).
fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_email      TEXT NOT NULL REFERENCES users(email)
                            ON DELETE CASCADE ON UPDATE CASCADE,
            date            TEXT NOT NULL,
            kind            TEXT NOT NULL CHECK(kind IN ('overtime','timeoff')),
            fact_hours      REAL NOT NULL,
            credited_hours  REAL NOT NULL,
            comment         TEXT DEFAULT '',
            approved_by     TEXT DEFAULT '',
            acknowledged_by TEXT DEFAULT '',
            edited_at       TEXT,
            change_history  TEXT NOT NULL DEFAULT '[]',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_email, date);
        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
        "#,
    )?;
    Ok(())
}

/// Create the `settings` key/value table.
fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Migrate an old `entries` table to include the acknowledgement column.
/// Early databases tracked post-approval edits only in change_history.
fn migrate_add_acknowledged_to_entries(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "entries")? {
        return Ok(()); // nessuna tabella → niente da migrare
    }

    if has_column(conn, "entries", "acknowledged_by")? {
        return Ok(()); // già presente → OK
    }

    warning("Adding 'acknowledged_by' column to entries table...");

    conn.execute_batch(
        r#"
        ALTER TABLE entries ADD COLUMN acknowledged_by TEXT DEFAULT '';
        "#,
    )?;
    Ok(())
}

/// Run all pending schema migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    create_users_table(conn)?;
    create_entries_table(conn)?;
    create_settings_table(conn)?;
    ensure_log_table(conn)?;
    migrate_add_acknowledged_to_entries(conn)?;
    Ok(())
}
