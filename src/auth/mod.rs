//! Single-owner authentication: password registration, log in/out and the cookie guard.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register_user;
mod token;
pub(crate) mod user;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_in::post_log_in;
pub use log_out::post_log_out;
pub use middleware::auth_guard;
pub use register_user::register_user;
pub use token::Token;
pub use user::{OWNER_ID, User, UserID, create_user_table, get_user_by_id, set_owner_password};

#[cfg(test)]
pub use cookie::{COOKIE_TOKEN, get_token_from_cookies};

#[cfg(test)]
pub use middleware::AuthState;

#[cfg(test)]
pub use user::{count_users, create_user};
