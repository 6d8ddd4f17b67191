use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::optimistic::delete_entry;
use crate::db::log::oplog;
use crate::errors::AppResult;
use crate::models::entry_id::EntryId;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
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

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = &cli.command {
        let (mut store, mut state) = super::load_session(cli, cfg)?;

        let entry_id = EntryId::Durable(*id);
        let Some(target) = state.find_entry(entry_id).cloned() else {
            warning(format!("Entry {} not found; nothing to delete.", id));
            return Ok(());
        };

        if !*yes {
            let prompt = format!(
                "Delete entry {} ({} {} hrs on {})?",
                id,
                target.kind.to_db_str(),
                target.fact_hours,
                target.date_str()
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        match delete_entry(&mut state, &mut store, entry_id) {
            Ok(removed) => {
                oplog(
                    store.conn(),
                    "del",
                    &format!("entry {}", id),
                    &format!(
                        "deleted {} {} hrs on {} for {}",
                        removed.kind.to_db_str(),
                        removed.fact_hours,
                        removed.date_str(),
                        removed.user_email
                    ),
                )?;
                success(format!("Entry {} deleted.", id));

                // undo is a fresh create, so the restored entry gets a new id
                let mut hint = format!(
                    "Undo with: rtoil add {} {} {}",
                    removed.date_str(),
                    removed.kind.to_db_str(),
                    removed.fact_hours
                );
                if !removed.comment.is_empty() {
                    hint.push_str(&format!(" --comment \"{}\"", removed.comment));
                }
                if !removed.approved_by.is_empty() {
                    hint.push_str(&format!(" --approved-by \"{}\"", removed.approved_by));
                }
                info(hint);
            }
            Err(e) if e.is_not_found() => {
                warning(format!("{}; nothing to delete.", e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
