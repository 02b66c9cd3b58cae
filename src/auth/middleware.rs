//! Current-user extraction
//!
//! Resolves the session cookie to a username by asking the backend.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use super::session;
use crate::AppState;

/// A browser session the backend vouched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: String,
}

/// Optional current user extractor
///
/// Never rejects. No cookie means no backend call; a cookie means exactly
/// one `/verify` call. Any backend trouble, including a success reply that
/// names no user, resolves to `None`, so pages fail open to the logged-out view.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(session_id) = session::session_id(&jar) else {
            return Ok(MaybeUser(None));
        };

        let app_state = AppState::from_ref(state);
        let user = match app_state.backend.verify(&session_id).await {
            Ok(reply) if reply.success => Some(SessionUser {
                username: reply.username().to_owned(),
            }),
            Ok(_) => {
                tracing::debug!("Backend rejected session cookie");
                None
            }
            Err(_) => None,
        };

        Ok(MaybeUser(user))
    }
}
