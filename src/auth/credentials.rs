//! Form input and length validation
//!
//! Lengths are counted in characters after trimming. Login and signup
//! enforce different bounds: signup has no lower bound.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LOGIN_USERNAME_LEN: RangeInclusive<usize> = 5..=20;
pub const LOGIN_PASSWORD_LEN: RangeInclusive<usize> = 5..=255;
pub const SIGNUP_USERNAME_MAX: usize = 20;
pub const SIGNUP_PASSWORD_MAX: usize = 255;

/// A field length outside its allowed bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username or email must be between 5 and 20 characters.")]
    LoginUsername,
    #[error("Password must be between 5 and 255 characters.")]
    LoginPassword,
    #[error("Username must be at most 20 characters.")]
    SignupUsername,
    #[error("Password must be at most 255 characters.")]
    SignupPassword,
}

impl ValidationError {
    /// Which form rejected the input
    pub fn form(self) -> &'static str {
        match self {
            Self::LoginUsername | Self::LoginPassword => "login",
            Self::SignupUsername | Self::SignupPassword => "signup",
        }
    }

    /// Which field was out of bounds
    pub fn field(self) -> &'static str {
        match self {
            Self::LoginUsername => "username_or_email",
            Self::SignupUsername => "username",
            Self::LoginPassword | Self::SignupPassword => "password",
        }
    }
}

/// Raw login form; absent fields are empty strings
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username_or_email: String,
    pub password: String,
}

/// Raw signup form; absent fields are empty strings
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Trimmed login credentials, serialized as the backend `/login` body
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub username_or_email: String,
    pub password: String,
}

/// Trimmed signup credentials, serialized as the backend `/signup` body
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupCredentials {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl LoginForm {
    pub fn trimmed(self) -> LoginCredentials {
        LoginCredentials {
            username_or_email: self.username_or_email.trim().to_owned(),
            password: self.password.trim().to_owned(),
        }
    }
}

impl SignupForm {
    pub fn trimmed(self) -> SignupCredentials {
        SignupCredentials {
            username: self.username.trim().to_owned(),
            password: self.password.trim().to_owned(),
            email: self.email.trim().to_owned(),
        }
    }
}

impl LoginCredentials {
    /// Username/email first, then password
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !LOGIN_USERNAME_LEN.contains(&self.username_or_email.chars().count()) {
            return Err(ValidationError::LoginUsername);
        }
        if !LOGIN_PASSWORD_LEN.contains(&self.password.chars().count()) {
            return Err(ValidationError::LoginPassword);
        }
        Ok(())
    }
}

impl SignupCredentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.chars().count() > SIGNUP_USERNAME_MAX {
            return Err(ValidationError::SignupUsername);
        }
        if self.password.chars().count() > SIGNUP_PASSWORD_MAX {
            return Err(ValidationError::SignupPassword);
        }
        Ok(())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username_or_email", &self.username_or_email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for SignupCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}
