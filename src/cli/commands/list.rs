use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::balance::{calculate_balance, totals_by_type};
use crate::core::filter::{DateBucket, SortOrder, filter_by_bucket, search_entries, sort_entries};
use crate::errors::AppResult;
use crate::models::entry::TimeEntry;
use crate::models::user::User;
use crate::utils::date::{display_date, today};
use crate::utils::formatting::{hours2readable, paint_balance, paint_credited};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        filter,
        search,
        sort,
        all,
        user,
    } = &cli.command
    {
        let (_store, state) = super::load_session(cli, cfg)?;
        let me = state.current_user.clone().expect("session user loaded");

        if *all || user.is_some() {
            super::require_admin(&me)?;
        }

        // narrow to the requested owner first, like the admin user cards
        let mut shown: Vec<TimeEntry> = if *all {
            state.entries.clone()
        } else if let Some(email) = user {
            let email = email.to_lowercase();
            state
                .entries
                .iter()
                .filter(|e| e.user_email == email)
                .cloned()
                .collect()
        } else {
            state.own_entries().into_iter().cloned().collect()
        };

        let balance_set = shown.clone();

        // CLI flags win; the config file supplies the session defaults
        let bucket = filter.unwrap_or_else(|| {
            DateBucket::from_input(&cfg.date_filter).unwrap_or(DateBucket::All)
        });
        let order = sort
            .unwrap_or_else(|| SortOrder::from_input(&cfg.sort_order).unwrap_or(SortOrder::Desc));

        shown = filter_by_bucket(&shown, bucket, today());
        if let Some(term) = search {
            let owners: Option<&[User]> = if me.is_admin() {
                Some(&state.users)
            } else {
                None
            };
            shown = search_entries(&shown, term, owners);
        }
        shown = sort_entries(&shown, order);

        if shown.is_empty() {
            println!("No entries found.");
            return Ok(());
        }

        let mut columns = vec![
            Column::new("ID", 4),
            Column::new("Date", 10),
            Column::new("Type", 8),
            Column::new("Hours", 5),
            Column::new("Credited", 8),
            Column::new("Comment", 20),
            Column::new("Approved", 10),
        ];
        if *all {
            columns.push(Column::new("User", 18));
        }

        let mut table = Table::new(columns);
        for e in &shown {
            let approved = if e.needs_acknowledgement() {
                format!("{} ✏️", e.approved_by)
            } else {
                e.approved_by.clone()
            };

            let mut row = vec![
                e.id.to_string(),
                display_date(e.date),
                e.kind.label().to_string(),
                format!("{:.1}", e.fact_hours),
                paint_credited(e.credited_hours),
                e.comment.clone(),
                approved,
            ];
            if *all {
                row.push(e.user_email.clone());
            }
            table.add_row(row);
        }

        print!("{}", table.render());

        // Balance footer covers the owner's full entry set, not the
        // filtered slice (same as the balance card in the original).
        if !*all {
            let totals = totals_by_type(&balance_set);
            println!(
                "\nBalance: {}  (overtime {}, time off -{})",
                paint_balance(calculate_balance(&balance_set)),
                hours2readable(totals.overtime_total, true),
                hours2readable(totals.timeoff_total, false),
            );
        }
    }

    Ok(())
}
