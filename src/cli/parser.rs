use crate::core::filter::{DateBucket, SortOrder};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rtoil
/// CLI application to track overtime and time-off balances with SQLite
#[derive(Parser)]
#[command(
    name = "rtoil",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track overtime and time off: per-user hour balances with a configurable credit multiplier",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as a different registered user (email)
    #[arg(global = true, long = "as", value_name = "EMAIL")]
    pub acting_as: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database and configuration, and register the session user
    Init {
        /// Your email address (session identity)
        #[arg(long)]
        email: String,

        /// Display name (defaults to the mailbox part of the email)
        #[arg(long)]
        name: Option<String>,

        /// Register with the admin role
        #[arg(long)]
        admin: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log overtime or time off
    Add {
        /// Date of the entry (YYYY-MM-DD)
        date: String,

        /// Entry kind: overtime or timeoff
        kind: String,

        /// Actual hours worked or taken (0 < h <= 24)
        hours: f64,

        /// Free-text comment
        #[arg(long)]
        comment: Option<String>,

        /// Approving admin name (time off only)
        #[arg(long = "approved-by")]
        approved_by: Option<String>,
    },

    /// List entries
    List {
        /// Date bucket: all, today, week or month (default from config)
        #[arg(long = "filter", value_enum)]
        filter: Option<DateBucket>,

        /// Free-text search over comment, date and (admin) owner
        #[arg(long)]
        search: Option<String>,

        /// Sort order on date (default from config)
        #[arg(long, value_enum)]
        sort: Option<SortOrder>,

        /// Show all users' entries (admin only)
        #[arg(long)]
        all: bool,

        /// Show one user's entries (admin only)
        #[arg(long, value_name = "EMAIL")]
        user: Option<String>,
    },

    /// Show balance and totals
    Balance {
        /// Balance of another user (admin only)
        #[arg(long, value_name = "EMAIL")]
        user: Option<String>,
    },

    /// Edit an entry's date, comment or approver (hours and kind are fixed)
    Edit {
        /// Entry id
        id: i64,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New comment
        #[arg(long)]
        comment: Option<String>,

        /// New approving admin name (time off only)
        #[arg(long = "approved-by")]
        approved_by: Option<String>,
    },

    /// Delete an entry
    Del {
        /// Entry id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Approve a time-off entry (admin only)
    Approve {
        /// Entry id
        id: i64,

        /// Approver name (defaults to your display name)
        #[arg(long)]
        by: Option<String>,
    },

    /// Acknowledge a post-approval edit (admin only)
    Ack {
        /// Entry id
        id: i64,
    },

    /// List or manage users (admin only for management)
    Users {
        /// Rename a user: email=new name
        #[arg(long = "set-name", value_name = "EMAIL=NAME")]
        set_name: Option<String>,

        /// Change a user's role: email=user|admin
        #[arg(long = "set-role", value_name = "EMAIL=ROLE")]
        set_role: Option<String>,

        /// Delete a user and all of the user's entries
        #[arg(long, value_name = "EMAIL")]
        delete: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show or set the overtime multiplier
    Settings {
        /// New multiplier (admin only; finite, > 0)
        #[arg(long)]
        multiplier: Option<f64>,
    },

    /// Show an entry's change history
    History {
        /// Entry id
        id: i64,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
