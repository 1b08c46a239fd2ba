//! The shop's cash ledger and its running balance.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod recalculate;
mod summary;
mod validation;

pub use self::core::{
    LedgerEntry, LedgerState, create_ledger_table, get_all_entries, get_latest_balance,
    get_ledger_entry, map_row_to_entry,
};
pub use create_endpoint::{create_ledger_entry, create_ledger_entry_endpoint};
pub use delete_endpoint::{delete_ledger_entry, delete_ledger_entry_endpoint};
pub use list_endpoint::get_ledger_endpoint;
pub use recalculate::{recalculate_balances, recalculate_ledger, replay_balances};
pub use summary::{LedgerSummary, get_ledger_summary, get_ledger_summary_endpoint};
pub use validation::{EntryValidationError, NewLedgerEntry, ValidatedEntry};
