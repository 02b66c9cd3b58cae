//! HTTP client for the backend auth service

use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::dto::{BackendResponse, SessionRequest};
use crate::auth::{LoginCredentials, SignupCredentials};
use crate::config::BackendConfig;
use crate::error::AppError;
use crate::metrics::{BACKEND_REQUESTS_TOTAL, BACKEND_REQUEST_DURATION_SECONDS};

/// Why a backend call produced no usable reply
#[derive(Debug, Error)]
pub enum BackendError {
    /// No reply within the configured timeout
    #[error("backend did not answer in time")]
    Timeout,

    /// Connection refused, DNS failure, reset, ...
    #[error("backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// Reply was not the expected JSON shape
    #[error("malformed backend reply: {0}")]
    Malformed(String),
}

impl BackendError {
    fn kind(&self) -> &'static str {
        match self {
            BackendError::Timeout => "timeout",
            BackendError::Transport(_) => "transport",
            BackendError::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_decode() {
            BackendError::Malformed(err.to_string())
        } else {
            BackendError::Transport(err)
        }
    }
}

/// Backend endpoints the gateway calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Signup,
    Verify,
    Logout,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Signup => "signup",
            Endpoint::Verify => "verify",
            Endpoint::Logout => "logout",
        }
    }
}

/// Client for the backend auth service
///
/// Holds a single pooled `reqwest::Client`; the configured timeout bounds
/// every call, including reading the body. Calls are never retried.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    login_url: Url,
    signup_url: Url,
    verify_url: Url,
    logout_url: Url,
}

impl BackendClient {
    /// Build the client from configuration
    ///
    /// A path on the base URL is kept: `http://host/auth` resolves
    /// `/login` to `http://host/auth/login`.
    pub fn new(config: &BackendConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("Gatehouse/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        let mut base_url = config.url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let join = |endpoint: Endpoint| {
            base_url.join(endpoint.name()).map_err(|e| {
                AppError::Config(format!(
                    "backend.url cannot be joined with {:?}: {e}",
                    endpoint.name()
                ))
            })
        };

        Ok(Self {
            login_url: join(Endpoint::Login)?,
            signup_url: join(Endpoint::Signup)?,
            verify_url: join(Endpoint::Verify)?,
            logout_url: join(Endpoint::Logout)?,
            http_client,
        })
    }

    /// Absolute URL of a backend endpoint
    pub fn url(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Login => &self.login_url,
            Endpoint::Signup => &self.signup_url,
            Endpoint::Verify => &self.verify_url,
            Endpoint::Logout => &self.logout_url,
        }
    }

    /// POST /login
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<BackendResponse, BackendError> {
        let reply = self.post(Endpoint::Login, credentials).await?;
        require_session(reply)
    }

    /// POST /signup
    pub async fn signup(
        &self,
        credentials: &SignupCredentials,
    ) -> Result<BackendResponse, BackendError> {
        let reply = self.post(Endpoint::Signup, credentials).await?;
        require_session(reply)
    }

    /// POST /verify
    pub async fn verify(&self, session_id: &str) -> Result<BackendResponse, BackendError> {
        let reply = self
            .post(Endpoint::Verify, &SessionRequest { session_id })
            .await?;
        require_username(reply)
    }

    /// POST /logout
    pub async fn logout(&self, session_id: &str) -> Result<BackendResponse, BackendError> {
        self.post(Endpoint::Logout, &SessionRequest { session_id })
            .await
    }

    async fn post<B>(&self, endpoint: Endpoint, body: &B) -> Result<BackendResponse, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let timer = BACKEND_REQUEST_DURATION_SECONDS
            .with_label_values(&[endpoint.name()])
            .start_timer();
        let result = self.send(endpoint, body).await;
        timer.observe_duration();

        let outcome = match &result {
            Ok(reply) if reply.success => "success",
            Ok(_) => "rejected",
            Err(error) => error.kind(),
        };
        BACKEND_REQUESTS_TOTAL
            .with_label_values(&[endpoint.name(), outcome])
            .inc();

        match &result {
            Ok(reply) => tracing::debug!(
                endpoint = endpoint.name(),
                success = reply.success,
                "Backend replied"
            ),
            Err(error) => tracing::warn!(
                endpoint = endpoint.name(),
                %error,
                "Backend call failed"
            ),
        }

        result
    }

    async fn send<B>(&self, endpoint: Endpoint, body: &B) -> Result<BackendResponse, BackendError>
    where
        B: Serialize + ?Sized,
    {
        // The status code is ignored; only the JSON body decides the outcome.
        let response = self
            .http_client
            .post(self.url(endpoint).clone())
            .json(body)
            .send()
            .await?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

/// A successful login or signup must carry a session token
fn require_session(reply: BackendResponse) -> Result<BackendResponse, BackendError> {
    if reply.success && reply.session_id().is_none() {
        return Err(BackendError::Malformed(
            "success reply without a session_id".to_string(),
        ));
    }
    Ok(reply)
}

/// A successful verify must name the user it verified
fn require_username(reply: BackendResponse) -> Result<BackendResponse, BackendError> {
    if reply.success && reply.username().trim().is_empty() {
        return Err(BackendError::Malformed(
            "verify success reply without a username".to_string(),
        ));
    }
    Ok(reply)
}
