//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/ledger/{entry_id}', use [format_endpoint].

/// The route for registering the password of the single user.
pub const USERS: &str = "/api/users";
/// The route for logging in.
pub const LOG_IN: &str = "/api/log_in";
/// The route for logging out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route for listing and creating ledger entries.
pub const LEDGER: &str = "/api/ledger";
/// The route for the ledger totals.
pub const LEDGER_SUMMARY: &str = "/api/ledger/summary";
/// The route for a single ledger entry.
pub const LEDGER_ENTRY: &str = "/api/ledger/{entry_id}";

/// Replace the first `{parameter}` in `endpoint_path` with `id`.
///
/// Returns `endpoint_path` unchanged if it has no parameter.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}
