//! Login, signup and logout
//!
//! Handles:
//! - Form validation before anything reaches the backend
//! - Session cookie lifecycle
//! - Resolving the current user from the session cookie

mod credentials;
mod middleware;
mod routes;
pub mod session;

pub use credentials::{LoginCredentials, LoginForm, SignupCredentials, SignupForm, ValidationError};
pub use middleware::{MaybeUser, SessionUser};
pub use routes::auth_router;
