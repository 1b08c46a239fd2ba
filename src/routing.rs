//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use crate::{
    AppState, Error,
    auth::{auth_guard, post_log_in, post_log_out, register_user},
    endpoints,
    ledger::{
        create_ledger_entry_endpoint, delete_ledger_entry_endpoint, get_ledger_endpoint,
        get_ledger_summary_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::USERS, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, post(post_log_out));

    let protected_routes = Router::new()
        .route(
            endpoints::LEDGER,
            get(get_ledger_endpoint).post(create_ledger_entry_endpoint),
        )
        .route(endpoints::LEDGER_SUMMARY, get(get_ledger_summary_endpoint))
        .route(endpoints::LEDGER_ENTRY, delete(delete_ledger_entry_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
