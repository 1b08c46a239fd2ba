//! Defines the endpoint for listing the ledger.

use axum::extract::State;

use crate::{
    Error,
    api_response::ApiResponse,
    ledger::{LedgerEntry, LedgerState, get_all_entries},
};

/// A route handler for listing every ledger entry in canonical order with its running balance.
pub async fn get_ledger_endpoint(
    State(state): State<LedgerState>,
) -> Result<ApiResponse<Vec<LedgerEntry>>, Error> {
    let connection = state.lock_connection()?;
    let entries = get_all_entries(&connection)?;

    Ok(ApiResponse::data(entries))
}
