use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{AppState, Error, database_id::DatabaseId, money::Money};

/// One debit or credit in the shop's cash ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The database ID, increasing in creation order.
    pub id: DatabaseId,
    /// The day the money moved.
    pub entry_date: Date,
    /// The counterparty, if any.
    pub name: Option<String>,
    /// What the entry is for.
    pub particulars: String,
    /// Money paid out.
    pub dr_amount: Money,
    /// Money received.
    pub cr_amount: Money,
    /// Credits minus debits of this and every earlier entry in canonical order.
    pub balance: Money,
}

impl LedgerEntry {
    /// The key entries are sorted by when computing running balances.
    ///
    /// Entries on the same day are ordered by creation.
    pub fn canonical_key(&self) -> (Date, DatabaseId) {
        (self.entry_date, self.id)
    }

    /// How much this entry moves the balance by, or `None` if that does not fit in cents.
    pub fn net_amount(&self) -> Option<Money> {
        self.cr_amount.checked_sub(self.dr_amount)
    }
}

/// The state needed by the ledger endpoints.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The database connection for managing the ledger.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl LedgerState {
    pub(super) fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create the ledger table and the index backing canonical order.
///
/// `AUTOINCREMENT` stops SQLite from reusing the IDs of deleted entries, so IDs
/// keep increasing in creation order.
pub fn create_ledger_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS ledger (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_date TEXT NOT NULL,
            name TEXT,
            particulars TEXT NOT NULL,
            dr_amount INTEGER NOT NULL DEFAULT 0 CHECK (dr_amount >= 0),
            cr_amount INTEGER NOT NULL DEFAULT 0 CHECK (cr_amount >= 0),
            balance INTEGER NOT NULL DEFAULT 0,
            CHECK ((dr_amount > 0) <> (cr_amount > 0))
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_ledger_entry_date_id ON ledger (entry_date, id)",
        (),
    )?;

    Ok(())
}

pub fn map_row_to_entry(row: &Row) -> Result<LedgerEntry, rusqlite::Error> {
    Ok(LedgerEntry {
        id: row.get(0)?,
        entry_date: row.get(1)?,
        name: row.get(2)?,
        particulars: row.get(3)?,
        dr_amount: row.get(4)?,
        cr_amount: row.get(5)?,
        balance: row.get(6)?,
    })
}

/// Get every ledger entry in canonical order, oldest first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_all_entries(connection: &Connection) -> Result<Vec<LedgerEntry>, Error> {
    connection
        .prepare(
            "SELECT id, entry_date, name, particulars, dr_amount, cr_amount, balance
            FROM ledger
            ORDER BY entry_date ASC, id ASC",
        )?
        .query_map([], map_row_to_entry)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the ledger entry with `id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such entry.
pub fn get_ledger_entry(id: DatabaseId, connection: &Connection) -> Result<LedgerEntry, Error> {
    connection
        .query_one(
            "SELECT id, entry_date, name, particulars, dr_amount, cr_amount, balance
            FROM ledger WHERE id = ?1",
            params![id],
            map_row_to_entry,
        )
        .map_err(Error::from)
}

/// The stored balance of the last entry in canonical order, or zero for an empty ledger.
pub fn get_latest_balance(connection: &Connection) -> Result<Money, Error> {
    let balance = connection
        .query_row(
            "SELECT balance FROM ledger ORDER BY entry_date DESC, id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(balance.unwrap_or(Money::ZERO))
}
