// SPDX-License-Identifier: MPL-2.0

//! Cache orchestration: freshness policy, the refresh pipeline, and lazy
//! repair of stale nickname bindings.

mod search;
mod sweep;

pub use search::{SearchEntry, SearchPage};
pub use sweep::{SweepReport, Sweeper};

use chrono::Utc;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::identity::IdentityResolver;
use crate::mojang::{IdentityService, UpstreamError};
use crate::store::{CachedProfile, ProfileStore, StoreError};
use crate::texture::{TextureError, compose_head};

#[derive(Error, Debug)]
pub enum EngineError {
    /// Input is neither a permanent-id shape nor a plausible nickname.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    /// The identity or profile does not exist upstream.
    #[error("not found")]
    NotFound,
    /// Upstream answered with something other than success or a clean miss.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(UpstreamError),
    /// Valid search query, empty result. Distinct from `NotFound`.
    #[error("no content")]
    NoContent,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("texture error: {0}")]
    Texture(#[from] TextureError),
}

impl From<UpstreamError> for EngineError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::NotFound => Self::NotFound,
            other => Self::UpstreamUnavailable(other),
        }
    }
}

/// The cache engine: resolves volatile nicknames to permanent ids and
/// keeps one row of texture data per id fresh against an injected store.
pub struct CacheEngine<S, C> {
    pub(crate) store: S,
    pub(crate) client: C,
    pub(crate) resolver: IdentityResolver,
    pub(crate) config: EngineConfig,
}

impl<S: ProfileStore, C: IdentityService> CacheEngine<S, C> {
    pub fn new(store: S, client: C, config: EngineConfig) -> Self {
        Self {
            store,
            client,
            resolver: IdentityResolver::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Turn caller input into a permanent id. A 32-hex shape (hyphens
    /// optional) passes through without any upstream call; anything else
    /// must look like a nickname and is resolved upstream.
    pub async fn resolve_identity(&self, input: &str) -> Result<String, EngineError> {
        if let Some(id) = self.resolver.normalize_id(input) {
            return Ok(id);
        }
        if !self.resolver.is_plausible_nickname(input) {
            return Err(EngineError::InvalidIdentifier(input.to_string()));
        }
        let nickname = self.resolver.normalize_nickname(input);
        Ok(self.client.lookup_id(&nickname).await?)
    }

    /// Resolve `name_or_id` and return its cached row, refreshing it first
    /// when missing, expired, or `force`d.
    ///
    /// Concurrent calls for a never-before-seen identity each run the full
    /// upstream fetch and converge through the id-keyed upsert (last write
    /// wins). That duplicate upstream load is a known inefficiency, kept
    /// because deduplication would change observable timing and errors.
    pub async fn get_or_refresh(
        &self,
        name_or_id: &str,
        force: bool,
    ) -> Result<CachedProfile, EngineError> {
        let id = self.resolve_identity(name_or_id).await?;
        let existing = self.store.find_by_id(&id)?;

        if let Some(row) = &existing {
            if !force && Utc::now().timestamp() < row.expires_at {
                tracing::debug!(id, "cache hit");
                return Ok(row.clone());
            }
        }

        self.refresh(&id, existing).await
    }

    /// Read the external ownership claim on an identity, if any. Claims
    /// are written by an outside collaborator; this engine only reads them.
    pub fn claim_check(&self, id: &str) -> Result<Option<String>, EngineError> {
        Ok(self.store.find_by_id(id)?.and_then(|row| row.owner_id))
    }

    /// One full fetch sequence: canonical profile, collision repair, skin
    /// (or the default sheet), derived head, optional cape, then an upsert
    /// with a fresh expiry.
    async fn refresh(
        &self,
        id: &str,
        existing: Option<CachedProfile>,
    ) -> Result<CachedProfile, EngineError> {
        let profile = self.client.fetch_profile(id).await?;
        let nickname = self.resolver.normalize_nickname(&profile.name);

        // This fetch is authoritative for this exact id, so a changed name
        // is a same-identity rename and can be applied right away.
        if let Some(row) = &existing {
            if row.display_name != profile.name {
                tracing::info!(id, from = %row.display_name, to = %profile.name, "rename observed");
                self.store.rename(id, &nickname, &profile.name)?;
            }
        }

        self.reconcile_collisions(id, &nickname).await;

        let skin = match &profile.skin_url {
            Some(url) => self.client.fetch_bytes(url).await?,
            // No skin configured upstream is a normal state, not an error.
            None => self.config.default_skin.clone(),
        };
        let head = compose_head(&skin)?;

        let cape = match &profile.cape_url {
            Some(url) => match self.client.fetch_bytes(url).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(id, error = %e, "cape fetch failed, storing none");
                    None
                }
            },
            None => None,
        };

        let row = CachedProfile {
            id: id.to_string(),
            nickname,
            display_name: profile.name,
            expires_at: Utc::now().timestamp() + self.config.ttl_secs,
            skin,
            cape,
            head,
            slim: profile.slim_model,
            // Carried through for the returned value; the upsert itself
            // never overwrites these externally-owned columns.
            searchable: existing.as_ref().is_some_and(|r| r.searchable),
            owner_id: existing.and_then(|r| r.owner_id),
        };
        self.store.upsert(&row)?;
        tracing::debug!(id, nickname = %row.nickname, "profile refreshed");
        Ok(row)
    }

    /// Nicknames are leases: other rows may still be bound to the name we
    /// just confirmed for `id`. Re-fetch each such row by its own id and
    /// patch its name fields if upstream disagrees with what is stored.
    /// One extra upstream call per colliding row; failures skip that row.
    async fn reconcile_collisions(&self, id: &str, nickname: &str) {
        let clashing = match self.store.find_by_nickname(nickname) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(nickname, error = %e, "collision query failed");
                return;
            }
        };

        for row in clashing.into_iter().filter(|r| r.id != id) {
            match self.client.fetch_profile(&row.id).await {
                Ok(profile) if profile.name != row.display_name => {
                    let renamed = self.resolver.normalize_nickname(&profile.name);
                    match self.store.rename(&row.id, &renamed, &profile.name) {
                        Ok(()) => {
                            tracing::info!(
                                id = %row.id,
                                from = %row.display_name,
                                to = %profile.name,
                                "stale nickname binding repaired"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(id = %row.id, error = %e, "collision patch failed")
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(id = %row.id, error = %e, "collision re-fetch failed, skipping")
                }
            }
        }
    }
}
