//! Wire types shared with the backend auth service

use serde::{Deserialize, Serialize};

/// Body for `/verify` and `/logout`
#[derive(Serialize)]
pub struct SessionRequest<'a> {
    pub session_id: &'a str,
}

/// Reply from any backend endpoint
///
/// Every field is optional on the wire; a reply without `success` counts
/// as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl BackendResponse {
    /// Session token, if one was issued
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Human-readable message, or "" when the backend sent none
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}
