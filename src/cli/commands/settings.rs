use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::settings::set_multiplier;
use crate::db::log::oplog;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings { multiplier } = &cli.command {
        let (mut store, mut state) = super::load_session(cli, cfg)?;
        let me = state.current_user.clone().expect("session user loaded");

        match multiplier {
            Some(value) => {
                super::require_admin(&me)?;
                let old = state.multiplier;
                set_multiplier(&mut state, &mut store, *value)?;
                oplog(
                    store.conn(),
                    "settings",
                    "overtimeMultiplier",
                    &format!("changed from x{} to x{}", old, value),
                )?;
                success(format!("Overtime multiplier set to x{}.", value));
            }
            None => {
                println!("Overtime multiplier: x{}", state.multiplier);
            }
        }
    }

    Ok(())
}
