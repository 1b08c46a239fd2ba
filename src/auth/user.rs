//! Code for creating the user table and fetching the shop owner's account.

use std::fmt::Display;

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::{Error, password::PasswordHash};

/// A newtype wrapper for integer user IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The back office has a single login, stored as the first user.
pub const OWNER_ID: UserID = UserID(1);

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            password TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn create_user(password_hash: PasswordHash, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (password) VALUES (?1)",
        params![password_hash.as_ref()],
    )?;

    Ok(User {
        id: UserID::new(connection.last_insert_rowid()),
        password_hash,
    })
}

/// Set the password of the owner account, creating the account if needed.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn set_owner_password(
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (id, password) VALUES (?1, ?2)
        ON CONFLICT(id) DO UPDATE SET password = excluded.password",
        params![OWNER_ID.as_i64(), password_hash.as_ref()],
    )?;

    Ok(User {
        id: OWNER_ID,
        password_hash,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .query_one(
            "SELECT id, password FROM user WHERE id = ?1",
            params![user_id.as_i64()],
            |row| {
                let raw_password_hash: String = row.get(1)?;

                Ok(User {
                    id: UserID::new(row.get(0)?),
                    password_hash: PasswordHash::new_unchecked(&raw_password_hash),
                })
            },
        )
        .map_err(Error::from)
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user", [], |row| row.get(0))
        .map_err(Error::from)
}

#[cfg(test)]
mod user_tests {
    use rusqlite::Connection;

    use crate::{Error, password::PasswordHash};

    use super::{
        OWNER_ID, UserID, count_users, create_user, create_user_table, get_user_by_id,
        set_owner_password,
    };

    fn get_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_user_table(&connection).unwrap();
        connection
    }

    #[test]
    fn first_user_is_the_owner() {
        let connection = get_db_connection();

        let user = create_user(PasswordHash::new_unchecked("hunter2"), &connection).unwrap();

        assert_eq!(user.id, OWNER_ID);
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let connection = get_db_connection();

        assert_eq!(
            get_user_by_id(UserID::new(42), &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let connection = get_db_connection();
        let user = create_user(PasswordHash::new_unchecked("hunter2"), &connection).unwrap();

        assert_eq!(get_user_by_id(user.id, &connection), Ok(user));
    }

    #[test]
    fn set_owner_password_replaces_existing_hash() {
        let connection = get_db_connection();
        create_user(PasswordHash::new_unchecked("old"), &connection).unwrap();

        set_owner_password(PasswordHash::new_unchecked("new"), &connection).unwrap();

        let owner = get_user_by_id(OWNER_ID, &connection).unwrap();
        assert_eq!(owner.password_hash, PasswordHash::new_unchecked("new"));
        assert_eq!(count_users(&connection), Ok(1));
    }

    #[test]
    fn returns_correct_count() {
        let connection = get_db_connection();
        assert_eq!(count_users(&connection), Ok(0));

        create_user(PasswordHash::new_unchecked("hunter2"), &connection).unwrap();

        assert_eq!(count_users(&connection), Ok(1));
    }
}
