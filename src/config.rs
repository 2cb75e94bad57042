// SPDX-License-Identifier: MPL-2.0

use std::time::Duration;

/// Mojang nickname -> id lookup endpoint (the name is appended as a path segment).
pub const DEFAULT_LOOKUP_API: &str = "https://api.mojang.com/users/profiles/minecraft";

/// Mojang session endpoint serving the full profile with texture properties.
pub const DEFAULT_SESSION_API: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

/// Freshness window for a cached profile row.
pub const DEFAULT_TTL_SECS: i64 = 24 * 60 * 60;

/// How many of the stalest rows one revalidation sweep may touch.
pub const DEFAULT_SWEEP_BATCH: usize = 1000;

/// How often the revalidation sweep runs.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Fallback skin sheet used when an upstream profile carries no skin URL.
const DEFAULT_SKIN: &[u8] = include_bytes!("../assets/default_skin.png");

/// Immutable engine configuration, passed into component constructors.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL for nickname -> id lookups.
    pub lookup_api: String,
    /// Base URL for profile-by-id fetches.
    pub session_api: String,
    /// Seconds a refreshed row stays fresh.
    pub ttl_secs: i64,
    /// Upper bound on rows refreshed per sweep.
    pub sweep_batch: usize,
    /// Interval between sweeps.
    pub sweep_interval: Duration,
    /// Encoded PNG substituted when a profile has no skin URL.
    pub default_skin: Vec<u8>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookup_api: DEFAULT_LOOKUP_API.to_string(),
            session_api: DEFAULT_SESSION_API.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
            sweep_batch: DEFAULT_SWEEP_BATCH,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            default_skin: DEFAULT_SKIN.to_vec(),
        }
    }
}
