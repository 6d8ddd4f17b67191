use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::optimistic::{acknowledge_edit, approve_timeoff};
use crate::db::log::oplog;
use crate::errors::AppResult;
use crate::models::entry_id::EntryId;
use crate::ui::messages::{success, warning};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Approve { id, by } => {
            let (mut store, mut state) = super::load_session(cli, cfg)?;
            let me = state.current_user.clone().expect("session user loaded");
            super::require_admin(&me)?;

            let name = by.clone().unwrap_or(me.name);

            match approve_timeoff(&mut state, &mut store, EntryId::Durable(*id), &name) {
                Ok(entry) => {
                    oplog(
                        store.conn(),
                        "approve",
                        &format!("entry {}", entry.id),
                        &format!("time off of {} approved by {}", entry.user_email, name),
                    )?;
                    success(format!("Entry {} approved by {}.", entry.id, name));
                }
                Err(e) if e.is_not_found() => {
                    warning(format!("{}; nothing to approve.", e));
                }
                Err(e) => return Err(e),
            }
        }
        Commands::Ack { id } => {
            let (mut store, mut state) = super::load_session(cli, cfg)?;
            let me = state.current_user.clone().expect("session user loaded");
            super::require_admin(&me)?;

            match acknowledge_edit(&mut state, &mut store, EntryId::Durable(*id), &me.name) {
                Ok(entry) => {
                    oplog(
                        store.conn(),
                        "acknowledge",
                        &format!("entry {}", entry.id),
                        &format!("edit acknowledged by {}", me.name),
                    )?;
                    success(format!("Entry {} edit acknowledged.", entry.id));
                }
                Err(e) if e.is_not_found() => {
                    warning(format!("{}; nothing to acknowledge.", e));
                }
                Err(e) => return Err(e),
            }
        }
        _ => {}
    }

    Ok(())
}
