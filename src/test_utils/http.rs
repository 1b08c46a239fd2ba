use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::json;

use crate::{api_response::ErrorBody, auth::COOKIE_TOKEN, endpoints};

pub(crate) const TEST_PASSWORD: &str = "correct horse battery staple ledger";

#[track_caller]
pub(crate) fn assert_error_response(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);
    let body = response.json::<ErrorBody>();
    assert!(!body.success, "want success to be false, got {body:?}");
    assert_eq!(body.message, message);
}

/// Register the owner's password and keep the auth cookie on the server for later requests.
pub(crate) async fn log_in_test_server(server: &mut TestServer) {
    let response = server
        .post(endpoints::USERS)
        .json(&json!({ "password": TEST_PASSWORD, "confirm_password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);

    server.add_cookie(response.cookie(COOKIE_TOKEN));
}
