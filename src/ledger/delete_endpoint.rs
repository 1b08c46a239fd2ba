//! Defines the endpoint for deleting a ledger entry.

use axum::extract::{Path, State, rejection::PathRejection};
use rusqlite::{Connection, TransactionBehavior, params};

use crate::{
    Error,
    api_response::ApiResponse,
    database_id::DatabaseId,
    ledger::{LedgerState, recalculate_balances},
};

/// A route handler for deleting a ledger entry.
///
/// The response only confirms the deletion; clients re-list the ledger to see
/// the new balances.
pub async fn delete_ledger_entry_endpoint(
    State(state): State<LedgerState>,
    entry_id: Result<Path<DatabaseId>, PathRejection>,
) -> Result<ApiResponse<()>, Error> {
    let Path(entry_id) = entry_id?;

    let mut connection = state.lock_connection()?;
    delete_ledger_entry(entry_id, &mut connection)?;

    Ok(ApiResponse::message("Ledger entry deleted successfully"))
}

/// Delete the entry with `id` and recalculate the balances of the remaining entries.
///
/// Returns the number of entries left in the ledger.
///
/// # Errors
/// Returns [Error::DeleteMissingEntry] if there is no entry with `id`, or
/// [Error::SqlError] if a statement fails. The ledger is unchanged on error.
pub fn delete_ledger_entry(id: DatabaseId, connection: &mut Connection) -> Result<usize, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let rows_affected = transaction.execute("DELETE FROM ledger WHERE id = ?1", params![id])?;
    if rows_affected == 0 {
        return Err(Error::DeleteMissingEntry);
    }

    let remaining = recalculate_balances(&transaction)?;
    transaction.commit()?;

    tracing::info!("Deleted ledger entry {id}, recalculated {remaining} entries");

    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use time::macros::date;

    use crate::{
        Error,
        ledger::{LedgerState, get_all_entries, get_ledger_summary},
        money::Money,
        test_utils::{get_test_connection, insert_test_entry},
    };

    use super::{delete_ledger_entry, delete_ledger_entry_endpoint};

    #[test]
    fn deleting_entry_recalculates_remaining_balances() {
        let mut connection = get_test_connection();
        insert_test_entry(&mut connection, date!(2024 - 01 - 01), "Opening", 0, 10_000);
        let rent = insert_test_entry(&mut connection, date!(2024 - 01 - 02), "Rent", 3_000, 0);
        insert_test_entry(
            &mut connection,
            date!(2024 - 01 - 01),
            "Backdated credit",
            0,
            2_000,
        );

        let remaining = delete_ledger_entry(rent.id, &mut connection).unwrap();

        assert_eq!(remaining, 2);
        let balances: Vec<_> = get_all_entries(&connection)
            .unwrap()
            .into_iter()
            .map(|entry| entry.balance.cents())
            .collect();
        assert_eq!(balances, vec![10_000, 12_000]);
        assert_eq!(
            get_ledger_summary(&connection).unwrap().current_balance,
            Money::from_cents(12_000)
        );
    }

    #[test]
    fn deleting_earliest_entry_shifts_later_balances() {
        let mut connection = get_test_connection();
        let opening =
            insert_test_entry(&mut connection, date!(2024 - 01 - 01), "Opening", 0, 10_000);
        insert_test_entry(&mut connection, date!(2024 - 01 - 02), "Rent", 3_000, 0);

        delete_ledger_entry(opening.id, &mut connection).unwrap();

        let entries = get_all_entries(&connection).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].balance, Money::from_cents(-3_000));
    }

    #[test]
    fn deleting_missing_entry_changes_nothing() {
        let mut connection = get_test_connection();
        let opening =
            insert_test_entry(&mut connection, date!(2024 - 01 - 01), "Opening", 0, 10_000);

        let result = delete_ledger_entry(opening.id + 1, &mut connection);

        assert_eq!(result, Err(Error::DeleteMissingEntry));
        assert_eq!(get_all_entries(&connection).unwrap(), vec![opening]);
    }

    #[test]
    fn deleting_last_entry_leaves_empty_ledger() {
        let mut connection = get_test_connection();
        let only = insert_test_entry(&mut connection, date!(2024 - 01 - 01), "Sale", 0, 100);

        assert_eq!(delete_ledger_entry(only.id, &mut connection), Ok(0));
        assert!(get_all_entries(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn endpoint_confirms_deletion() {
        let mut connection = get_test_connection();
        let entry = insert_test_entry(&mut connection, date!(2024 - 01 - 01), "Sale", 0, 100);
        let state = LedgerState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_ledger_entry_endpoint(State(state), Ok(Path(entry.id)))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("Ledger entry deleted successfully")
        );
        assert_eq!(response.data, None);
    }

    #[tokio::test]
    async fn endpoint_returns_not_found_for_missing_entry() {
        let state = LedgerState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let result = delete_ledger_entry_endpoint(State(state), Ok(Path(42))).await;

        assert_eq!(result.unwrap_err(), Error::DeleteMissingEntry);
    }
}
