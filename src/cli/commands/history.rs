use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::entry_id::EntryId;
use crate::ui::messages::{header, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::History { id } = &cli.command {
        let (_store, state) = super::load_session(cli, cfg)?;

        let Some(entry) = state.find_entry(EntryId::Durable(*id)) else {
            warning(format!("Entry {} not found.", id));
            return Ok(());
        };

        header(format!(
            "Change history for entry {} ({} {} hrs on {})",
            id,
            entry.kind.to_db_str(),
            entry.fact_hours,
            entry.date_str()
        ));

        if entry.change_history.is_empty() {
            println!("No edits recorded.");
            return Ok(());
        }

        for rec in &entry.change_history {
            let approved_note = if rec.was_approved {
                " [was approved]"
            } else {
                ""
            };
            println!(
                "- {} by {} <{}>{}",
                rec.changed_at, rec.changed_by, rec.changed_by_email, approved_note
            );
            for ch in &rec.changes {
                println!("    {}: '{}' -> '{}'", ch.field, ch.from, ch.to);
            }
        }

        if entry.needs_acknowledgement() {
            warning("Edited after approval; not yet acknowledged by an admin.");
        } else if !entry.acknowledged_by.is_empty() {
            println!("\nAcknowledged by {}.", entry.acknowledged_by);
        }
    }

    Ok(())
}
