use crate::errors::{AppError, AppResult};
use crate::models::user::{Role, User};
use chrono::Local;
use rusqlite::{Connection, Result, Row, params};

pub fn map_user_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        role,
    })
}

pub fn load_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY name ASC")?;
    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE email = ?1")?;
    let mut rows = stmt.query_map([email.to_lowercase()], map_user_row)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

pub fn insert_user(conn: &Connection, email: &str, name: &str, role: Role) -> AppResult<User> {
    conn.execute(
        "INSERT INTO users (email, name, role, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            email.to_lowercase(),
            name,
            role.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;

    find_user_by_email(conn, email)?
        .ok_or_else(|| AppError::UserNotFound(email.to_string()))
}

pub fn update_user(
    conn: &Connection,
    email: &str,
    name: Option<&str>,
    role: Option<Role>,
) -> AppResult<User> {
    let existing = find_user_by_email(conn, email)?
        .ok_or_else(|| AppError::UserNotFound(email.to_string()))?;

    let new_name = name.unwrap_or(&existing.name);
    let new_role = role.unwrap_or(existing.role);

    conn.execute(
        "UPDATE users SET name = ?1, role = ?2 WHERE email = ?3",
        params![new_name, new_role.to_db_str(), email.to_lowercase()],
    )?;

    find_user_by_email(conn, email)?
        .ok_or_else(|| AppError::UserNotFound(email.to_string()))
}

/// Delete a user; the foreign key cascades to the user's entries.
pub fn delete_user(conn: &Connection, email: &str) -> AppResult<()> {
    let deleted = conn.execute(
        "DELETE FROM users WHERE email = ?1",
        [email.to_lowercase()],
    )?;
    if deleted == 0 {
        return Err(AppError::UserNotFound(email.to_string()));
    }
    Ok(())
}
