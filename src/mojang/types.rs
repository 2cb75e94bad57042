// SPDX-License-Identifier: MPL-2.0

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use url::Url;

use crate::mojang::UpstreamError;

/// Body of the nickname -> id lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub id: String,
    #[allow(dead_code)]
    pub name: String,
}

/// Body of the profile-by-id session endpoint.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    /// Base64-encoded JSON for the "textures" property.
    pub value: String,
}

/// Decoded payload of the base64 "textures" property.
#[derive(Debug, Deserialize)]
struct TexturesPayload {
    #[serde(default)]
    textures: TextureSet,
}

#[derive(Debug, Default, Deserialize)]
struct TextureSet {
    #[serde(rename = "SKIN")]
    skin: Option<TextureRef>,
    #[serde(rename = "CAPE")]
    cape: Option<TextureRef>,
}

#[derive(Debug, Deserialize)]
struct TextureRef {
    url: String,
    metadata: Option<TextureMetadata>,
}

#[derive(Debug, Deserialize)]
struct TextureMetadata {
    model: Option<String>,
}

/// Everything the engine needs from one authoritative upstream fetch.
/// Decoupled from the wire shapes so the rest of the crate owns its types.
#[derive(Debug, Clone)]
pub struct CanonicalProfile {
    /// Permanent 32-hex account id.
    pub id: String,
    /// Display-cased current name.
    pub name: String,
    /// Absent for accounts that never set a skin.
    pub skin_url: Option<Url>,
    /// Absent for accounts without a cape — a valid, non-error state.
    pub cape_url: Option<Url>,
    /// Texture model variant ("slim" arms).
    pub slim_model: bool,
}

impl CanonicalProfile {
    /// Decode the session response, including its embedded base64 JSON
    /// textures property.
    pub fn from_session_response(resp: SessionResponse) -> Result<Self, UpstreamError> {
        let mut skin_url = None;
        let mut cape_url = None;
        let mut slim_model = false;

        if let Some(prop) = resp.properties.iter().find(|p| p.name == "textures") {
            let raw = BASE64
                .decode(prop.value.as_bytes())
                .map_err(|e| UpstreamError::InvalidResponse(format!("textures base64: {e}")))?;
            let payload: TexturesPayload = serde_json::from_slice(&raw)
                .map_err(|e| UpstreamError::InvalidResponse(format!("textures json: {e}")))?;

            if let Some(skin) = payload.textures.skin {
                slim_model = skin
                    .metadata
                    .as_ref()
                    .and_then(|m| m.model.as_deref())
                    .is_some_and(|m| m == "slim");
                let url = Url::parse(&skin.url)
                    .map_err(|e| UpstreamError::InvalidResponse(format!("skin url: {e}")))?;
                skin_url = Some(url);
            }
            if let Some(cape) = payload.textures.cape {
                let url = Url::parse(&cape.url)
                    .map_err(|e| UpstreamError::InvalidResponse(format!("cape url: {e}")))?;
                cape_url = Some(url);
            }
        }

        Ok(Self {
            id: resp.id,
            name: resp.name,
            skin_url,
            cape_url,
            slim_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_textures(textures_json: &str) -> SessionResponse {
        SessionResponse {
            id: "069a79f444e94726a5befca90e38aaf5".into(),
            name: "Notch".into(),
            properties: vec![ProfileProperty {
                name: "textures".into(),
                value: BASE64.encode(textures_json),
            }],
        }
    }

    #[test]
    fn test_decode_skin_and_cape() {
        let resp = session_with_textures(
            r#"{"textures":{"SKIN":{"url":"http://textures.test/skin/abc"},"CAPE":{"url":"http://textures.test/cape/def"}}}"#,
        );
        let profile = CanonicalProfile::from_session_response(resp).unwrap();
        assert_eq!(profile.name, "Notch");
        assert_eq!(
            profile.skin_url.as_ref().map(Url::as_str),
            Some("http://textures.test/skin/abc")
        );
        assert_eq!(
            profile.cape_url.as_ref().map(Url::as_str),
            Some("http://textures.test/cape/def")
        );
        assert!(!profile.slim_model);
    }

    #[test]
    fn test_decode_slim_metadata() {
        let resp = session_with_textures(
            r#"{"textures":{"SKIN":{"url":"http://textures.test/skin/abc","metadata":{"model":"slim"}}}}"#,
        );
        let profile = CanonicalProfile::from_session_response(resp).unwrap();
        assert!(profile.slim_model);
        assert!(profile.cape_url.is_none());
    }

    #[test]
    fn test_missing_textures_property_is_bare_profile() {
        let resp = SessionResponse {
            id: "069a79f444e94726a5befca90e38aaf5".into(),
            name: "Notch".into(),
            properties: vec![],
        };
        let profile = CanonicalProfile::from_session_response(resp).unwrap();
        assert!(profile.skin_url.is_none());
        assert!(profile.cape_url.is_none());
        assert!(!profile.slim_model);
    }

    #[test]
    fn test_garbage_base64_is_invalid_response() {
        let resp = SessionResponse {
            id: "069a79f444e94726a5befca90e38aaf5".into(),
            name: "Notch".into(),
            properties: vec![ProfileProperty {
                name: "textures".into(),
                value: "not base64!!".into(),
            }],
        };
        assert!(matches!(
            CanonicalProfile::from_session_response(resp),
            Err(UpstreamError::InvalidResponse(_))
        ));
    }
}
