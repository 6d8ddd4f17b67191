use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::optimistic::update_entry;
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use crate::models::entry_id::EntryId;
use crate::ui::messages::{success, warning};
use crate::utils::date;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date: date_str,
        comment,
        approved_by,
    } = &cli.command
    {
        if date_str.is_none() && comment.is_none() && approved_by.is_none() {
            warning("Nothing to do: specify at least --date, --comment or --approved-by.");
            return Ok(());
        }

        let new_date = match date_str {
            Some(s) => {
                Some(date::parse_entry_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?)
            }
            None => None,
        };

        let (mut store, mut state) = super::load_session(cli, cfg)?;

        let result = update_entry(
            &mut state,
            &mut store,
            EntryId::Durable(*id),
            new_date,
            comment.as_deref(),
            approved_by.as_deref(),
        );

        match result {
            Ok(entry) => {
                oplog(
                    store.conn(),
                    "edit",
                    &format!("entry {}", entry.id),
                    &format!("edited entry of {} ({})", entry.user_email, entry.date_str()),
                )?;
                if entry.needs_acknowledgement() {
                    success(format!(
                        "Entry {} updated (was approved; flagged for admin review).",
                        entry.id
                    ));
                } else {
                    success(format!("Entry {} updated.", entry.id));
                }
            }
            Err(e) if e.is_not_found() => {
                // already gone: surfaced as a notice, not an error
                warning(format!("{}; nothing to edit.", e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
