use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::balance::calculate_balance;
use crate::core::optimistic::create_entry;
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use crate::models::entry_kind::EntryKind;
use crate::ui::messages::success;
use crate::utils::date;
use crate::utils::formatting::{hours2readable, paint_balance};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        kind,
        hours,
        comment,
        approved_by,
    } = &cli.command
    {
        let d = date::parse_entry_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
        let kind = EntryKind::from_input(kind).ok_or_else(|| {
            AppError::InvalidKind(format!("'{}'. Use 'overtime' or 'timeoff'.", kind))
        })?;

        let (mut store, mut state) = super::load_session(cli, cfg)?;

        let entry = create_entry(
            &mut state,
            &mut store,
            d,
            kind,
            *hours,
            comment.as_deref().unwrap_or(""),
            approved_by.as_deref().unwrap_or(""),
        )?;

        let own: Vec<_> = state.own_entries().into_iter().cloned().collect();
        let balance = calculate_balance(&own);

        oplog(
            store.conn(),
            "add",
            &format!("entry {}", entry.id),
            &format!(
                "{} {} hrs on {} for {}",
                entry.kind.to_db_str(),
                entry.fact_hours,
                entry.date_str(),
                entry.user_email
            ),
        )?;

        success(format!(
            "{} logged: {} hrs credited on {}. Balance: {}",
            entry.kind.label(),
            hours2readable(entry.credited_hours, true),
            entry.date_str(),
            paint_balance(balance),
        ));
    }

    Ok(())
}
