//! Login, signup and logout handlers
//!
//! Every path ends in an ordinary response: validation failures and backend
//! trouble are rendered as text or as the form again, never as a fault.

use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;

use super::credentials::{LoginForm, SignupForm, ValidationError};
use super::session;
use crate::AppState;
use crate::backend::BackendResponse;
use crate::error::AppError;
use crate::metrics::VALIDATION_REJECTIONS_TOTAL;
use crate::views;

/// Create authentication router
///
/// Routes:
/// - GET/POST /login
/// - GET/POST /signup
/// - GET /logout
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page).post(signup))
        .route("/logout", get(logout))
}

// =============================================================================
// Login
// =============================================================================

/// GET /login
async fn login_page() -> Html<String> {
    Html(views::login_form())
}

/// POST /login
///
/// # Steps
/// 1. Trim and length-check the fields (no backend call on failure)
/// 2. Forward to backend `/login`
/// 3. Set the session cookie and redirect home, or report the backend message
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Option<Form<LoginForm>>,
) -> Response {
    let credentials = form.map(|Form(form)| form).unwrap_or_default().trimmed();
    if let Err(rejection) = credentials.validate() {
        return reject(rejection);
    }

    match state.backend.login(&credentials).await {
        Ok(reply) => start_session(&state, jar, reply, "Login"),
        Err(_) => Html(views::login_form()).into_response(),
    }
}

// =============================================================================
// Signup
// =============================================================================

/// GET /signup
async fn signup_page() -> Html<String> {
    Html(views::signup_form())
}

/// POST /signup
///
/// Same flow as login, with the signup bounds (upper limits only).
async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Option<Form<SignupForm>>,
) -> Response {
    let credentials = form.map(|Form(form)| form).unwrap_or_default().trimmed();
    if let Err(rejection) = credentials.validate() {
        return reject(rejection);
    }

    match state.backend.signup(&credentials).await {
        Ok(reply) => start_session(&state, jar, reply, "Signup"),
        Err(_) => Html(views::signup_form()).into_response(),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// GET /logout
///
/// Without a cookie there is nothing to do and the backend is not asked.
/// Once the backend has answered, the cookie is cleared either way: a
/// session it refuses to end is no use to the browser.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let Some(session_id) = session::session_id(&jar) else {
        return Ok("Not logged in".into_response());
    };

    let reply = state.backend.logout(&session_id).await?;
    let jar = jar.add(session::removal_cookie(&state.config.cookie));

    if reply.success {
        tracing::info!("Session logged out");
        Ok((jar, Redirect::to("/")).into_response())
    } else {
        log_refused_logout(reply.message());
        Ok((jar, with_message("Logout unsuccessful", reply.message())).into_response())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn log_refused_logout(backend_message: &str) {
    tracing::info!(backend_message, "Backend refused logout");
}

fn reject(rejection: ValidationError) -> Response {
    VALIDATION_REJECTIONS_TOTAL
        .with_label_values(&[rejection.form(), rejection.field()])
        .inc();
    tracing::debug!(form = rejection.form(), field = rejection.field(), "Form rejected");

    rejection.to_string().into_response()
}

/// Turn a login/signup reply into a cookie + redirect, or a failure message
fn start_session(state: &AppState, jar: CookieJar, reply: BackendResponse, action: &str) -> Response {
    match reply.session_id() {
        Some(session_id) if reply.success => {
            tracing::info!(action, "Session started");
            let cookie = session::session_cookie(session_id, &state.config.cookie);
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        _ => with_message(&format!("{action} unsuccessful"), reply.message()).into_response(),
    }
}

fn with_message(headline: &str, message: &str) -> String {
    if message.is_empty() {
        headline.to_string()
    } else {
        format!("{headline}: {message}")
    }
}
