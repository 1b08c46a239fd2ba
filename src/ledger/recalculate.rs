//! Running balance maintenance.
//!
//! The stored `balance` column is a cache of the running total in canonical
//! order. Every mutation replays the whole ledger and rewrites every row.

use rusqlite::{Connection, TransactionBehavior, params};

use crate::{
    Error,
    ledger::{LedgerEntry, get_all_entries},
    money::Money,
};

/// Sort `entries` into canonical order and overwrite each entry's running balance.
///
/// # Errors
/// Returns [Error::BalanceOverflow] if a running balance does not fit in cents.
/// Balances already written to `entries` are then partly updated.
pub fn replay_balances(entries: &mut [LedgerEntry]) -> Result<(), Error> {
    entries.sort_by_key(LedgerEntry::canonical_key);

    let mut balance = Money::ZERO;
    for entry in entries.iter_mut() {
        balance = entry
            .net_amount()
            .and_then(|net_amount| balance.checked_add(net_amount))
            .ok_or_else(|| {
                tracing::warn!("Running balance overflows at ledger entry {}", entry.id);
                Error::BalanceOverflow
            })?;
        entry.balance = balance;
    }

    Ok(())
}

/// Recompute and store the running balance of every ledger entry.
///
/// Callers that mutate the ledger should pass the open transaction so the
/// write and the recalculation commit together.
///
/// Returns the number of entries that were rewritten.
///
/// # Errors
/// Returns [Error::SqlError] if reading or updating the ledger fails, or
/// [Error::BalanceOverflow] if a running balance does not fit in cents.
/// Nothing is written in the overflow case.
pub fn recalculate_balances(connection: &Connection) -> Result<usize, Error> {
    let mut entries = get_all_entries(connection)?;
    replay_balances(&mut entries)?;

    let mut statement = connection.prepare_cached("UPDATE ledger SET balance = ?1 WHERE id = ?2")?;
    for entry in &entries {
        statement.execute(params![entry.balance, entry.id])?;
    }

    Ok(entries.len())
}

/// Recalculate the whole ledger in its own transaction.
///
/// Used at start up to repair balances that were edited outside the app.
pub fn recalculate_ledger(connection: &mut Connection) -> Result<usize, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let count = recalculate_balances(&transaction)?;
    transaction.commit()?;

    Ok(count)
}
