//! Ledger totals computed directly from the debit and credit columns.

use axum::extract::State;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, api_response::ApiResponse, ledger::LedgerState, money::Money};

/// Totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// The sum of all debits.
    pub total_dr: Money,
    /// The sum of all credits.
    pub total_cr: Money,
    /// Total credits minus total debits.
    pub current_balance: Money,
    /// The number of entries in the ledger.
    pub total_entries: usize,
}

/// Sum the debit and credit columns of the ledger.
///
/// This does not read the stored running balances, so for a non-empty ledger
/// `current_balance` independently confirms the balance of the last entry.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails, which includes SQLite's
/// integer overflow on a column sum, or [Error::BalanceOverflow] if the
/// difference of the totals does not fit in cents.
pub fn get_ledger_summary(connection: &Connection) -> Result<LedgerSummary, Error> {
    let (total_dr, total_cr, total_entries): (Money, Money, usize) = connection.query_row(
        "SELECT COALESCE(SUM(dr_amount), 0), COALESCE(SUM(cr_amount), 0), COUNT(id)
        FROM ledger",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let current_balance = total_cr
        .checked_sub(total_dr)
        .ok_or(Error::BalanceOverflow)?;

    Ok(LedgerSummary {
        total_dr,
        total_cr,
        current_balance,
        total_entries,
    })
}

/// A route handler for the ledger totals.
pub async fn get_ledger_summary_endpoint(
    State(state): State<LedgerState>,
) -> Result<ApiResponse<LedgerSummary>, Error> {
    let connection = state.lock_connection()?;
    let summary = get_ledger_summary(&connection)?;

    Ok(ApiResponse::data(summary))
}
