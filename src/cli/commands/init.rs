use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::oplog;
use crate::errors::AppResult;
use crate::models::user::Role;
use crate::store::SqliteStore;
use crate::ui::messages::success;

pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Commands::Init { email, name, admin } = &cli.command {
        let cfg = Config::init_all(cli.db.clone(), email, cli.test)?;

        let mut store = SqliteStore::open(&cfg.database)?;
        init_db(store.conn())?;

        let role = if *admin { Role::Admin } else { Role::User };
        let user = crate::core::users::ensure_user(&mut store, email, name.as_deref(), role)?;

        oplog(
            store.conn(),
            "init",
            &user.email,
            &format!("registered {} ({})", user.name, user.role.to_db_str()),
        )?;

        success(format!(
            "Ready. Session user: {} <{}> [{}]",
            user.name,
            user.email,
            user.role.to_db_str()
        ));
    }

    Ok(())
}
