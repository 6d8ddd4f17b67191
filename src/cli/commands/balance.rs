use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::balance::{calculate_balance, month_hours, totals_by_type};
use crate::errors::AppResult;
use crate::models::entry::TimeEntry;
use crate::ui::messages::header;
use crate::utils::date::today;
use crate::utils::formatting::{hours2readable, paint_balance};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Balance { user } = &cli.command {
        let (_store, state) = super::load_session(cli, cfg)?;
        let me = state.current_user.clone().expect("session user loaded");

        let (label, set): (String, Vec<TimeEntry>) = if let Some(email) = user {
            super::require_admin(&me)?;
            let email = email.to_lowercase();
            let name = state
                .find_user(&email)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| email.clone());
            (
                name,
                state
                    .entries
                    .iter()
                    .filter(|e| e.user_email == email)
                    .cloned()
                    .collect(),
            )
        } else {
            (
                me.name.clone(),
                state.own_entries().into_iter().cloned().collect(),
            )
        };

        let totals = totals_by_type(&set);
        let balance = calculate_balance(&set);
        let this_month = month_hours(&set, today());

        header(format!("Balance for {}", label));
        println!("  Balance:     {}", paint_balance(balance));
        println!(
            "  Overtime:    {} hrs",
            hours2readable(totals.overtime_total, true)
        );
        println!(
            "  Time off:    -{} hrs",
            hours2readable(totals.timeoff_total, false)
        );
        println!("  This month:  {} hrs moved", hours2readable(this_month, false));
        println!("  Multiplier:  x{}", state.multiplier);
    }

    Ok(())
}
