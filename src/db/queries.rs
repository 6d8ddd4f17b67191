use crate::errors::{AppError, AppResult};
use crate::models::change::ChangeRecord;
use crate::models::entry::TimeEntry;
use crate::models::entry_id::EntryId;
use crate::models::entry_kind::EntryKind;
use crate::utils::date::parse_entry_date;
use chrono::Local;
use rusqlite::{Connection, Result, Row, params};

/// Mutable fields of an entry update. Hours and kind are deliberately
/// absent: they are immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub date: Option<chrono::NaiveDate>,
    pub comment: Option<String>,
    pub approved_by: Option<String>,
    pub acknowledged_by: Option<String>,
    pub edited_at: Option<String>,
    pub change_history: Option<Vec<ChangeRecord>>,
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;

    // Both "YYYY-MM-DD" and ISO-datetime-at-midnight forms occur in data
    // migrated from the hosted backend; normalize on read.
    let date = parse_entry_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EntryKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidKind(kind_str.clone())),
        )
    })?;

    let history_raw: String = row
        .get::<_, Option<String>>("change_history")?
        .unwrap_or_default();
    let change_history: Vec<ChangeRecord> =
        serde_json::from_str(&history_raw).unwrap_or_default();

    Ok(TimeEntry {
        id: EntryId::Durable(row.get("id")?),
        user_email: row.get("user_email")?,
        date,
        kind,
        fact_hours: row.get::<_, Option<f64>>("fact_hours")?.unwrap_or(0.0),
        credited_hours: row
            .get::<_, Option<f64>>("credited_hours")?
            .unwrap_or(0.0),
        comment: row.get::<_, Option<String>>("comment")?.unwrap_or_default(),
        approved_by: row
            .get::<_, Option<String>>("approved_by")?
            .unwrap_or_default(),
        acknowledged_by: row
            .get::<_, Option<String>>("acknowledged_by")?
            .unwrap_or_default(),
        edited_at: row.get("edited_at")?,
        change_history,
        created_at: row.get("created_at")?,
    })
}

/// Load entries, newest first; `user_email` narrows the scope to one owner
/// (the "all" scope is the admin view).
pub fn load_entries(conn: &Connection, user_email: Option<&str>) -> AppResult<Vec<TimeEntry>> {
    let mut out = Vec::new();

    if let Some(email) = user_email {
        let mut stmt = conn.prepare(
            "SELECT * FROM entries
             WHERE user_email = ?1
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([email.to_lowercase()], map_row)?;
        for r in rows {
            out.push(r?);
        }
    } else {
        let mut stmt = conn.prepare("SELECT * FROM entries ORDER BY date DESC, id DESC")?;
        let rows = stmt.query_map([], map_row)?;
        for r in rows {
            out.push(r?);
        }
    }

    Ok(out)
}

pub fn load_entry(conn: &Connection, id: i64) -> AppResult<TimeEntry> {
    let mut stmt = conn.prepare("SELECT * FROM entries WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_row)?;

    match rows.next() {
        Some(r) => Ok(r?),
        None => Err(AppError::EntryNotFound(id.to_string())),
    }
}

/// Insert an entry and return the durable record (id and created_at are
/// assigned here, the store side of the optimistic create).
pub fn insert_entry(conn: &Connection, ev: &TimeEntry) -> AppResult<TimeEntry> {
    let created_at = Local::now().to_rfc3339();
    let history = serde_json::to_string(&ev.change_history)
        .map_err(|e| AppError::Other(e.to_string()))?;

    conn.execute(
        "INSERT INTO entries (user_email, date, kind, fact_hours, credited_hours,
                              comment, approved_by, acknowledged_by, edited_at,
                              change_history, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            ev.user_email.to_lowercase(),
            ev.date.format("%Y-%m-%d").to_string(),
            ev.kind.to_db_str(),
            ev.fact_hours,
            ev.credited_hours,
            ev.comment,
            ev.approved_by,
            ev.acknowledged_by,
            ev.edited_at,
            history,
            created_at,
        ],
    )?;

    load_entry(conn, conn.last_insert_rowid())
}

/// Apply a patch to an entry. The row is loaded, merged and written back in
/// full, and the merged record is returned.
pub fn update_entry(conn: &Connection, id: i64, patch: &EntryPatch) -> AppResult<TimeEntry> {
    let mut ev = load_entry(conn, id)?;

    if let Some(d) = patch.date {
        ev.date = d;
    }
    if let Some(ref c) = patch.comment {
        ev.comment = c.clone();
    }
    if let Some(ref a) = patch.approved_by {
        ev.approved_by = a.clone();
    }
    if let Some(ref a) = patch.acknowledged_by {
        ev.acknowledged_by = a.clone();
    }
    if let Some(ref t) = patch.edited_at {
        ev.edited_at = Some(t.clone());
    }
    if let Some(ref h) = patch.change_history {
        ev.change_history = h.clone();
    }

    let history = serde_json::to_string(&ev.change_history)
        .map_err(|e| AppError::Other(e.to_string()))?;

    conn.execute(
        "UPDATE entries
         SET date = ?1, comment = ?2, approved_by = ?3,
             acknowledged_by = ?4, edited_at = ?5, change_history = ?6
         WHERE id = ?7",
        params![
            ev.date.format("%Y-%m-%d").to_string(),
            ev.comment,
            ev.approved_by,
            ev.acknowledged_by,
            ev.edited_at,
            history,
            id,
        ],
    )?;

    Ok(ev)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::EntryNotFound(id.to_string()));
    }
    Ok(())
}
