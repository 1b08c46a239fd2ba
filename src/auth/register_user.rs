//! Route handler for setting the owner's password for the first time.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    auth::{
        set_auth_cookie,
        user::{count_users, create_user},
    },
    password::{PasswordHash, ValidatedPassword},
};

/// The state needed to register the owner's password.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection holding the user table.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The body of a registration request.
#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    /// The new password.
    pub password: String,
    /// The new password, typed a second time.
    pub confirm_password: String,
}

fn ensure_no_password_set(connection: &Connection) -> Result<(), Error> {
    if count_users(connection)? >= 1 {
        return Err(Error::PasswordAlreadySet);
    }

    Ok(())
}

/// Set the owner's password and log them in.
///
/// # Errors
///
/// This function will return an error if:
/// - a password has already been set,
/// - the password is too weak,
/// - the passwords do not match,
/// - or the password could not be hashed or stored.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    user_data: Result<Json<RegisterForm>, JsonRejection>,
) -> Result<(StatusCode, PrivateCookieJar, ApiResponse<()>), Error> {
    let Json(user_data) = user_data?;

    {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        ensure_no_password_set(&connection)?;
    }

    let validated_password = ValidatedPassword::new(&user_data.password)?;

    if user_data.password != user_data.confirm_password {
        return Err(Error::PasswordMismatch);
    }

    let password_hash = PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST)
        .inspect_err(|error| {
            tracing::error!("an error occurred while hashing a password: {error}");
        })?;

    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        // Another request may have registered while the password was being hashed.
        ensure_no_password_set(&connection)?;
        create_user(password_hash, &connection)?
    };

    tracing::info!("Registered the owner's password");

    let jar = set_auth_cookie(jar, user.id, state.cookie_duration)?;

    Ok((
        StatusCode::CREATED,
        jar,
        ApiResponse::message("Password set successfully"),
    ))
}
