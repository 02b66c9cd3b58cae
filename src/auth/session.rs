//! Session cookie management
//!
//! The cookie holds an opaque token issued by the backend. The gateway never
//! interprets it; it only stores, forwards and clears it.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;

use crate::config::CookieConfig;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_id";

/// Build the cookie that stores a freshly issued session token
///
/// `HttpOnly`, `SameSite=Lax`, path `/`, fixed max age (no renewal).
/// `Secure` follows configuration.
pub fn session_cookie(session_id: &str, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_owned()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .path("/")
        .max_age(Duration::seconds(config.max_age_seconds))
        .build()
}

/// Build the cookie that clears the session: empty value, max age 0
pub fn removal_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Session token sent by the browser, if any
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
