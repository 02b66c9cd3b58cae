//! Home page

use axum::{Router, response::Html, routing::get};

use crate::AppState;
use crate::auth::{MaybeUser, SessionUser};
use crate::views;

/// Create home router
///
/// Routes:
/// - GET / - Home page, personalised when the session cookie verifies
pub fn home_router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// GET /
async fn home(MaybeUser(user): MaybeUser) -> Html<String> {
    match user {
        Some(SessionUser { username }) => Html(views::home_user(&username)),
        None => Html(views::home_guest()),
    }
}
