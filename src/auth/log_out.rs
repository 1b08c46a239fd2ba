//! Log-out route handler that invalidates the authentication cookie.

use axum_extra::extract::PrivateCookieJar;

use crate::{api_response::ApiResponse, auth::invalidate_auth_cookie};

/// Invalidate the auth cookie.
///
/// Logging out without a session is not an error, the client ends up logged out either way.
pub async fn post_log_out(jar: PrivateCookieJar) -> (PrivateCookieJar, ApiResponse<()>) {
    let jar = invalidate_auth_cookie(jar);

    (jar, ApiResponse::message("Logged out successfully"))
}

#[cfg(test)]
mod log_out_tests {
    use axum::{
        http::{StatusCode, header::SET_COOKIE},
        response::IntoResponse,
    };
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, UserID, set_auth_cookie};

    use super::post_log_out;

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        PrivateCookieJar::new(Key::from(&hash))
    }

    #[tokio::test]
    async fn log_out_invalidates_auth_cookie() {
        let jar = set_auth_cookie(get_jar(), UserID::new(1), DEFAULT_COOKIE_DURATION).unwrap();

        let response = post_log_out(jar).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|header| Cookie::parse(header.to_str().unwrap().to_owned()).unwrap())
            .find(|cookie| cookie.name() == COOKIE_TOKEN)
            .expect("want the auth cookie to be overwritten");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(cookie.expires_datetime().unwrap() <= OffsetDateTime::now_utc());
    }

    #[tokio::test]
    async fn log_out_without_session_succeeds() {
        let (_, response) = post_log_out(get_jar()).await;

        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Logged out successfully"));
    }
}
