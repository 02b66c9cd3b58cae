//! Backend auth service client
//!
//! Everything the gateway knows about authentication comes from four JSON
//! endpoints on a separate service: `/login`, `/signup`, `/verify` and
//! `/logout`. This module owns that contract.

mod client;
mod dto;

pub use client::{BackendClient, BackendError, Endpoint};
pub use dto::{BackendResponse, SessionRequest};
