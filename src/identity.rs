// SPDX-License-Identifier: MPL-2.0

//! Input normalization for the two identifier shapes the engine accepts:
//! a permanent 32-hex-digit account id (hyphens optional) or a nickname.
//! Nicknames are leases, not keys — mapping them to an id needs an
//! upstream call and lives in the cache engine; everything here is pure.

use regex::Regex;

/// Normalizes caller-supplied identifiers without touching the network.
pub struct IdentityResolver {
    id_shape: Regex,
    nickname_shape: Regex,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self {
            // 32 hex digits, optionally grouped 8-4-4-4-12 by hyphens.
            id_shape: Regex::new(
                r"^[0-9a-fA-F]{8}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{4}-?[0-9a-fA-F]{12}$",
            )
            .expect("id shape regex is valid"),
            nickname_shape: Regex::new(r"^[A-Za-z0-9_]{2,16}$")
                .expect("nickname shape regex is valid"),
        }
    }

    /// If `input` already has the permanent-id shape, return the canonical
    /// lowercased, hyphen-stripped form. `None` means the input is not an
    /// id and must be treated as a nickname.
    pub fn normalize_id(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if self.id_shape.is_match(trimmed) {
            Some(trimmed.replace('-', "").to_lowercase())
        } else {
            None
        }
    }

    /// Whether `input` could be a real nickname. Anything failing this is
    /// malformed and never worth an upstream lookup.
    pub fn is_plausible_nickname(&self, input: &str) -> bool {
        self.nickname_shape.is_match(input.trim())
    }

    /// Canonical stored form of a nickname.
    pub fn normalize_nickname(&self, input: &str) -> String {
        input.trim().to_lowercase()
    }
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hex_id_passes_through() {
        let r = IdentityResolver::new();
        assert_eq!(
            r.normalize_id("069a79f444e94726a5befca90e38aaf5").as_deref(),
            Some("069a79f444e94726a5befca90e38aaf5")
        );
    }

    #[test]
    fn test_hyphenated_id_is_stripped() {
        let r = IdentityResolver::new();
        assert_eq!(
            r.normalize_id("069a79f4-44e9-4726-a5be-fca90e38aaf5").as_deref(),
            Some("069a79f444e94726a5befca90e38aaf5")
        );
    }

    #[test]
    fn test_uppercase_id_is_lowercased() {
        let r = IdentityResolver::new();
        assert_eq!(
            r.normalize_id("069A79F444E94726A5BEFCA90E38AAF5").as_deref(),
            Some("069a79f444e94726a5befca90e38aaf5")
        );
    }

    #[test]
    fn test_nickname_is_not_an_id() {
        let r = IdentityResolver::new();
        assert!(r.normalize_id("Notch").is_none());
        assert!(r.normalize_id("069a79f444e9").is_none());
        assert!(r.normalize_id("zz9a79f444e94726a5befca90e38aaf5").is_none());
    }

    #[test]
    fn test_nickname_plausibility() {
        let r = IdentityResolver::new();
        assert!(r.is_plausible_nickname("Notch"));
        assert!(r.is_plausible_nickname("a_b"));
        assert!(!r.is_plausible_nickname("x"));
        assert!(!r.is_plausible_nickname("has spaces"));
        assert!(!r.is_plausible_nickname("seventeen_letters_"));
        assert!(!r.is_plausible_nickname(""));
    }

    #[test]
    fn test_nickname_normalization() {
        let r = IdentityResolver::new();
        assert_eq!(r.normalize_nickname("  Notch "), "notch");
    }
}
