use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::balance::calculate_balance;
use crate::core::users::{delete_user, update_user_name, update_user_role};
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::models::user::Role;
use crate::ui::messages::{info, success, warning};
use crate::utils::formatting::paint_balance;
use crate::utils::table::{Column, Table};

use std::io::{self, Write};

fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Split an "email=value" argument.
fn split_assignment(raw: &str) -> AppResult<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| AppError::Other(format!("expected EMAIL=VALUE, got '{}'", raw)))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Users {
        set_name,
        set_role,
        delete,
        yes,
    } = &cli.command
    {
        let (mut store, mut state) = super::load_session(cli, cfg)?;
        let me = state.current_user.clone().expect("session user loaded");

        let managing = set_name.is_some() || set_role.is_some() || delete.is_some();
        if managing {
            super::require_admin(&me)?;
        }

        if let Some(raw) = set_name {
            let (email, name) = split_assignment(raw)?;
            let user = update_user_name(&mut state, &mut store, email, name)?;
            oplog(
                store.conn(),
                "users",
                &user.email,
                &format!("renamed to '{}'", user.name),
            )?;
            success(format!("User {} renamed to '{}'.", user.email, user.name));
        }

        if let Some(raw) = set_role {
            let (email, role_str) = split_assignment(raw)?;
            let role = Role::from_input(role_str)
                .ok_or_else(|| AppError::InvalidRole(role_str.to_string()))?;
            let user = update_user_role(&mut state, &mut store, email, role)?;
            oplog(
                store.conn(),
                "users",
                &user.email,
                &format!("role set to {}", user.role.to_db_str()),
            )?;
            success(format!(
                "User {} role set to {}.",
                user.email,
                user.role.to_db_str()
            ));
        }

        if let Some(email) = delete {
            if !*yes
                && !ask_confirmation(&format!(
                    "Delete user {} and ALL of their entries? This action is irreversible.",
                    email
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            match delete_user(&mut state, &mut store, email) {
                Ok(()) => {
                    oplog(store.conn(), "users", email, "user deleted (entries cascade)")?;
                    success(format!("User {} deleted.", email));
                }
                Err(e) if e.is_not_found() => {
                    warning(format!("{}; nothing to delete.", e));
                }
                Err(e) => return Err(e),
            }
        }

        if !managing {
            // plain listing with balances, admin's user-card view
            super::require_admin(&me)?;

            let mut table = Table::new(vec![
                Column::new("Name", 18),
                Column::new("Email", 24),
                Column::new("Role", 6),
                Column::new("Balance", 10),
            ]);

            for u in &state.users {
                let set: Vec<TimeEntry> = state
                    .entries
                    .iter()
                    .filter(|e| e.user_email == u.email)
                    .cloned()
                    .collect();
                table.add_row(vec![
                    u.name.clone(),
                    u.email.clone(),
                    u.role.to_db_str().to_string(),
                    paint_balance(calculate_balance(&set)),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
