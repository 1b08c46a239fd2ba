//! Defines the endpoint for recording a new ledger entry.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::{Connection, TransactionBehavior, params};

use crate::{
    Error,
    api_response::ApiResponse,
    ledger::{
        LedgerEntry, LedgerState, NewLedgerEntry, ValidatedEntry, get_latest_balance,
        get_ledger_entry, get_ledger_summary, recalculate_balances,
    },
};

/// A route handler for recording a new ledger entry.
///
/// Responds with `201 Created` and the entry with its recalculated balance, or
/// `400 Bad Request` if the entry is invalid.
pub async fn create_ledger_entry_endpoint(
    State(state): State<LedgerState>,
    body: Result<Json<NewLedgerEntry>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<LedgerEntry>), Error> {
    let Json(new_entry) = body?;
    let entry = new_entry.validate().inspect_err(|error| {
        tracing::debug!("Rejected ledger entry: {error}");
    })?;

    let mut connection = state.lock_connection()?;
    let created = create_ledger_entry(entry, &mut connection)?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Ledger entry created successfully", created),
    ))
}

/// Insert `entry` and bring every running balance up to date.
///
/// The insert and the recalculation share one immediate transaction, so other
/// writers wait for the database lock and a failure part way leaves the ledger
/// untouched.
///
/// # Errors
/// Returns [Error::SqlError] if any statement fails, or [Error::BalanceOverflow]
/// if the entry would push the debit or credit total past the largest storable
/// amount. Nothing is saved in either case.
pub fn create_ledger_entry(
    entry: ValidatedEntry,
    connection: &mut Connection,
) -> Result<LedgerEntry, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    // Both column totals fit in cents, so every running balance does too.
    let summary = get_ledger_summary(&transaction)?;
    if summary.total_dr.checked_add(entry.dr_amount).is_none()
        || summary.total_cr.checked_add(entry.cr_amount).is_none()
    {
        tracing::warn!(
            "Rejected ledger entry dated {}: totals would overflow",
            entry.entry_date
        );
        return Err(Error::BalanceOverflow);
    }

    // Only correct when the new entry sorts last; the recalculation below fixes backdated entries.
    let provisional_balance = get_latest_balance(&transaction)?
        .checked_add(entry.cr_amount)
        .and_then(|balance| balance.checked_sub(entry.dr_amount))
        .ok_or(Error::BalanceOverflow)?;

    transaction.execute(
        "INSERT INTO ledger (entry_date, name, particulars, dr_amount, cr_amount, balance)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.entry_date,
            entry.name,
            entry.particulars,
            entry.dr_amount,
            entry.cr_amount,
            provisional_balance,
        ],
    )?;
    let id = transaction.last_insert_rowid();
    tracing::debug!("Inserted ledger entry {id} with provisional balance {provisional_balance}");

    let recalculated = recalculate_balances(&transaction)?;
    let created = get_ledger_entry(id, &transaction)?;
    transaction.commit()?;

    tracing::info!(
        "Created ledger entry {id} dated {} with balance {}, recalculated {recalculated} entries",
        created.entry_date,
        created.balance
    );

    Ok(created)
}
