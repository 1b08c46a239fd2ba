//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{api_response::ErrorBody, ledger::EntryValidationError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an incorrect password.
    #[error("invalid password")]
    InvalidCredentials,

    /// The auth cookie is missing, expired or could not be decrypted.
    #[error("no valid auth cookie in the cookie jar")]
    CookieMissing,

    /// The auth token could not be serialized into or read from the cookie.
    #[error("could not read or write the auth token: {0}")]
    InvalidToken(String),

    /// A log in was attempted before a password was registered.
    #[error("a password has not been set")]
    PasswordNotSet,

    /// A password was registered when one already exists.
    #[error("a password has already been set")]
    PasswordAlreadySet,

    /// The password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The request path or body could not be parsed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A ledger entry failed validation and was not saved.
    #[error(transparent)]
    InvalidEntry(#[from] EntryValidationError),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Recording an entry would push a running balance or a ledger total past
    /// the largest amount that can be stored.
    #[error("a ledger balance or total would overflow")]
    BalanceOverflow,

    /// Tried to delete a ledger entry that does not exist.
    #[error("tried to delete a ledger entry that is not in the database")]
    DeleteMissingEntry,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials | Error::CookieMissing | Error::PasswordNotSet => {
                StatusCode::UNAUTHORIZED
            }
            Error::PasswordAlreadySet => StatusCode::CONFLICT,
            Error::PasswordMismatch
            | Error::TooWeak(_)
            | Error::InvalidRequest(_)
            | Error::InvalidEntry(_)
            | Error::BalanceOverflow => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::DeleteMissingEntry => StatusCode::NOT_FOUND,
            Error::InvalidToken(_)
            | Error::HashingError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Error::InvalidCredentials => "Incorrect password.".to_owned(),
            Error::CookieMissing => "You must be logged in to access this resource.".to_owned(),
            Error::PasswordNotSet => {
                "Password not set, register a password before logging in.".to_owned()
            }
            Error::PasswordAlreadySet => {
                "A password has already been created, log in with your existing password."
                    .to_owned()
            }
            Error::PasswordMismatch => "Passwords do not match.".to_owned(),
            Error::TooWeak(feedback) => format!("Password is too weak: {feedback}"),
            Error::InvalidRequest(detail) => format!("Invalid request: {detail}"),
            Error::InvalidEntry(error) => error.to_string(),
            Error::NotFound => "The requested resource could not be found.".to_owned(),
            Error::BalanceOverflow => {
                "The ledger totals would exceed the largest amount that can be recorded.".to_owned()
            }
            Error::DeleteMissingEntry => "Ledger entry not found.".to_owned(),
            Error::SqlError(_) => "A database error occurred.".to_owned(),
            Error::InvalidToken(_) | Error::HashingError(_) | Error::DatabaseLockError => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Storage failures carry the driver message so the operator can see what went wrong.
        // TODO: hide the SQL detail once the API is reachable from outside the shop network.
        let detail = match &self {
            Error::SqlError(error) => Some(error.to_string()),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, ErrorBody::new(self.client_message(), detail)).into_response()
    }
}
