#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_error_response, log_in_test_server};

use rusqlite::Connection;
use time::Date;

use crate::{
    db::initialize,
    ledger::{LedgerEntry, NewLedgerEntry, create_ledger_entry},
    money::Money,
};

/// An in-memory database with every table created.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&connection).expect("Could not initialize database.");
    connection
}

/// Insert an entry through the same path as the API and return the stored row.
///
/// A zero amount is sent as a missing field.
#[track_caller]
pub(crate) fn insert_test_entry(
    connection: &mut Connection,
    entry_date: Date,
    particulars: &str,
    dr_cents: i64,
    cr_cents: i64,
) -> LedgerEntry {
    let new_entry = NewLedgerEntry {
        entry_date: Some(entry_date),
        name: None,
        particulars: Some(particulars.to_owned()),
        dr_amount: (dr_cents != 0).then(|| Money::from_cents(dr_cents)),
        cr_amount: (cr_cents != 0).then(|| Money::from_cents(cr_cents)),
    };
    let validated = new_entry.validate().expect("Test entry should be valid.");

    create_ledger_entry(validated, connection).expect("Could not insert test entry.")
}

/// Assert that every balance is the previous balance plus the entry's credit minus its debit.
#[track_caller]
pub(crate) fn assert_balance_recurrence(entries: &[LedgerEntry]) {
    let mut previous = Money::ZERO;

    for entry in entries {
        let want = previous
            .checked_add(entry.cr_amount)
            .and_then(|balance| balance.checked_sub(entry.dr_amount));
        assert_eq!(
            Some(entry.balance),
            want,
            "balance of entry {} does not follow from the entry before it",
            entry.id
        );
        previous = entry.balance;
    }
}
