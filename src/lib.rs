// SPDX-License-Identifier: MPL-2.0

//! Identity resolution and skin caching for Minecraft accounts.
//!
//! A nickname is a time-shared lease, not a stable key: it can be dropped
//! and re-claimed by a different account. This crate resolves nicknames to
//! permanent account ids, caches the expensive texture payloads (skin,
//! cape, derived head thumbnail) behind a TTL, lazily repairs stale
//! nickname bindings left behind by handle reuse, and revalidates the
//! stalest rows on a background interval.
//!
//! Transport, sessions, authorization and account linking live above this
//! crate; durable storage and the upstream identity service are injected
//! ([`ProfileStore`], [`IdentityService`]).

pub mod config;
pub mod engine;
pub mod identity;
pub mod mojang;
pub mod store;
pub mod texture;

pub use config::EngineConfig;
pub use engine::{CacheEngine, EngineError, SearchEntry, SearchPage, SweepReport, Sweeper};
pub use identity::IdentityResolver;
pub use mojang::{CanonicalProfile, IdentityService, MojangClient, UpstreamError};
pub use store::{CachedProfile, ProfileStore, SqliteStore, StoreError};
pub use texture::{TextureError, compose_head, render_head_svg};
