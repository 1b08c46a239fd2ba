//! Creates the application's database schema.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, auth::create_user_table, ledger::create_ledger_table};

/// Create the user and ledger tables if they do not exist yet.
///
/// The tables are created in a single exclusive transaction, so a database is
/// either fully initialized or left as it was.
///
/// # Errors
/// Returns [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_ledger_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
