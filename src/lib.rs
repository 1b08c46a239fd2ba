//! A back-office REST API for a small shop's cash ledger.
//!
//! Every entry records a debit or a credit on a date, and every entry stores
//! the running balance of the ledger up to and including itself. Entries are
//! kept in canonical order (by entry date, then by creation order), so an
//! entry recorded late for an earlier date changes the balances of every
//! entry after it. Each insert and delete rewrites the running balances in the
//! same database transaction as the change.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod api_response;
mod app_state;
mod auth;
mod database_id;
mod db;
mod endpoints;
mod error;
mod ledger;
mod logging;
mod money;
mod password;
mod routing;
#[cfg(test)]
mod test_utils;

pub use api_response::{ApiResponse, ErrorBody};
pub use app_state::AppState;
pub use auth::{OWNER_ID, User, UserID, get_user_by_id, set_owner_password};
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use ledger::{
    EntryValidationError, LedgerEntry, LedgerSummary, NewLedgerEntry, create_ledger_entry,
    delete_ledger_entry, get_all_entries, get_ledger_summary, recalculate_ledger,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use money::Money;
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
