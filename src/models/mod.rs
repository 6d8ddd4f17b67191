pub mod change;
pub mod entry;
pub mod entry_id;
pub mod entry_kind;
pub mod user;
