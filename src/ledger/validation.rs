//! Validation of new ledger entries before they reach the database.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::money::Money;

/// The reasons a new ledger entry can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntryValidationError {
    /// The entry has no date.
    #[error("Entry date is required.")]
    MissingEntryDate,

    /// The date is before year 1.
    #[error("Entry date must be in year 1 or later.")]
    EntryDateOutOfRange,

    /// The particulars are missing or only whitespace.
    #[error("Particulars are required.")]
    MissingParticulars,

    /// A debit or credit amount is below zero.
    #[error("Amounts cannot be negative.")]
    NegativeAmount,

    /// Neither amount is above zero.
    #[error("Either a debit or a credit amount is required.")]
    NoAmount,

    /// Both amounts are above zero.
    #[error("An entry cannot have both a debit and a credit amount.")]
    BothAmounts,
}

/// The request body for creating a ledger entry.
///
/// Every field is optional here so that missing fields are reported by
/// [NewLedgerEntry::validate] rather than by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLedgerEntry {
    /// The day the money moved, as `YYYY-MM-DD`.
    pub entry_date: Option<Date>,
    /// The counterparty. Blank is the same as no name.
    pub name: Option<String>,
    /// What the entry is for.
    pub particulars: Option<String>,
    /// Money paid out.
    pub dr_amount: Option<Money>,
    /// Money received.
    pub cr_amount: Option<Money>,
}

/// A new ledger entry that is known to be valid.
///
/// Exactly one of the amounts is positive and neither is negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub(super) entry_date: Date,
    pub(super) name: Option<String>,
    pub(super) particulars: String,
    pub(super) dr_amount: Money,
    pub(super) cr_amount: Money,
}

impl NewLedgerEntry {
    /// Check the entry and normalise its text fields.
    ///
    /// Unset amounts default to zero, `particulars` is trimmed and a blank
    /// `name` is treated as no name.
    ///
    /// # Errors
    /// Returns the first rule the entry breaks.
    pub fn validate(self) -> Result<ValidatedEntry, EntryValidationError> {
        let entry_date = self
            .entry_date
            .ok_or(EntryValidationError::MissingEntryDate)?;

        if entry_date.year() < 1 {
            return Err(EntryValidationError::EntryDateOutOfRange);
        }

        let particulars = self
            .particulars
            .as_deref()
            .map(str::trim)
            .filter(|particulars| !particulars.is_empty())
            .ok_or(EntryValidationError::MissingParticulars)?
            .to_owned();

        let dr_amount = self.dr_amount.unwrap_or(Money::ZERO);
        let cr_amount = self.cr_amount.unwrap_or(Money::ZERO);

        if dr_amount.is_negative() || cr_amount.is_negative() {
            return Err(EntryValidationError::NegativeAmount);
        }

        match (dr_amount.is_positive(), cr_amount.is_positive()) {
            (false, false) => return Err(EntryValidationError::NoAmount),
            (true, true) => return Err(EntryValidationError::BothAmounts),
            _ => {}
        }

        let name = self
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        Ok(ValidatedEntry {
            entry_date,
            name,
            particulars,
            dr_amount,
            cr_amount,
        })
    }
}
