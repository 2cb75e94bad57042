// SPDX-License-Identifier: MPL-2.0

mod client;
mod types;

pub use client::{IdentityService, MojangClient};
pub use types::{CanonicalProfile, LookupResponse, ProfileProperty, SessionResponse};

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    #[error("not found upstream")]
    NotFound,
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}
