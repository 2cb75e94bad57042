// SPDX-License-Identifier: MPL-2.0

use async_trait::async_trait;
use url::Url;

use crate::config::EngineConfig;
use crate::mojang::UpstreamError;
use crate::mojang::types::{CanonicalProfile, LookupResponse, SessionResponse};

/// Upstream identity/texture service as the engine consumes it. One
/// attempt per call; retries and rate limiting are the caller's problem.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Map a nickname to its permanent account id.
    async fn lookup_id(&self, nickname: &str) -> Result<String, UpstreamError>;

    /// Fetch the canonical profile (name + texture URLs) for an id.
    async fn fetch_profile(&self, id: &str) -> Result<CanonicalProfile, UpstreamError>;

    /// Raw binary GET for a skin or cape texture.
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, UpstreamError>;
}

/// Wraps reqwest so the rest of the crate only sees our own types.
pub struct MojangClient {
    http: reqwest::Client,
    lookup_api: String,
    session_api: String,
}

impl MojangClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            lookup_api: config.lookup_api.clone(),
            session_api: config.session_api.clone(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, UpstreamError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))
    }
}

#[async_trait]
impl IdentityService for MojangClient {
    async fn lookup_id(&self, nickname: &str) -> Result<String, UpstreamError> {
        let resp = self.get(&format!("{}/{}", self.lookup_api, nickname)).await?;
        match resp.status().as_u16() {
            200 => {
                let body: LookupResponse = resp
                    .json()
                    .await
                    .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
                Ok(body.id.to_lowercase())
            }
            // The lookup endpoint has reported "no such name" both ways
            // over the years.
            204 | 404 => Err(UpstreamError::NotFound),
            status => Err(UpstreamError::Status(status)),
        }
    }

    async fn fetch_profile(&self, id: &str) -> Result<CanonicalProfile, UpstreamError> {
        let resp = self.get(&format!("{}/{}", self.session_api, id)).await?;
        match resp.status().as_u16() {
            200 => {
                let body: SessionResponse = resp
                    .json()
                    .await
                    .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;
                CanonicalProfile::from_session_response(body)
            }
            204 => Err(UpstreamError::NotFound),
            status => Err(UpstreamError::Status(status)),
        }
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, UpstreamError> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(UpstreamError::Status(resp.status().as_u16()));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
