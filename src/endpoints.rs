//! Endpoint catalog
//!
//! Every REST path the console talks to, grouped by resource. Numeric ids are
//! formatted as-is; device identifiers are strings and get percent-encoded.

use std::fmt::Display;

use reqwest::Url;

use crate::environment::Environment;
use crate::error::ApiError;

/// URL builders rooted at an environment's base and API URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    api_url: String,
}

impl Endpoints {
    pub fn new(environment: &Environment) -> Self {
        Self {
            base_url: environment.base_url.clone(),
            api_url: environment.api_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth(&self) -> AuthEndpoints<'_> {
        AuthEndpoints { api: &self.api_url }
    }

    pub fn videos(&self) -> VideoEndpoints<'_> {
        VideoEndpoints { api: &self.api_url }
    }

    pub fn playlists(&self) -> PlaylistEndpoints<'_> {
        PlaylistEndpoints { api: &self.api_url }
    }

    pub fn devices(&self) -> DeviceEndpoints<'_> {
        DeviceEndpoints { api: &self.api_url }
    }

    pub fn device_playlists(&self) -> DevicePlaylistEndpoints<'_> {
        DevicePlaylistEndpoints { api: &self.api_url }
    }

    pub fn system(&self) -> SystemEndpoints<'_> {
        SystemEndpoints { api: &self.api_url }
    }

    pub fn static_assets(&self) -> StaticEndpoints<'_> {
        StaticEndpoints {
            base: &self.base_url,
        }
    }
}

fn enc(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

pub struct AuthEndpoints<'a> {
    api: &'a str,
}

impl AuthEndpoints<'_> {
    pub fn login(&self) -> String {
        format!("{}/auth/login", self.api)
    }

    pub fn logout(&self) -> String {
        format!("{}/auth/logout", self.api)
    }

    pub fn refresh(&self) -> String {
        format!("{}/auth/refresh", self.api)
    }

    pub fn user(&self) -> String {
        format!("{}/auth/user", self.api)
    }
}

pub struct VideoEndpoints<'a> {
    api: &'a str,
}

impl VideoEndpoints<'_> {
    pub fn list(&self) -> String {
        format!("{}/videos", self.api)
    }

    pub fn by_id(&self, id: impl Display) -> String {
        format!("{}/videos/{id}", self.api)
    }

    pub fn upload(&self) -> String {
        format!("{}/videos/upload", self.api)
    }

    pub fn thumbnail(&self, id: impl Display) -> String {
        format!("{}/videos/{id}/thumbnail", self.api)
    }

    pub fn stream(&self, id: impl Display) -> String {
        format!("{}/videos/{id}/stream", self.api)
    }
}

pub struct PlaylistEndpoints<'a> {
    api: &'a str,
}

impl PlaylistEndpoints<'_> {
    pub fn list(&self) -> String {
        format!("{}/playlists", self.api)
    }

    pub fn by_id(&self, id: impl Display) -> String {
        format!("{}/playlists/{id}", self.api)
    }

    pub fn videos(&self, playlist_id: impl Display) -> String {
        format!("{}/playlists/{playlist_id}/videos", self.api)
    }

    /// Add (POST) or remove (DELETE) one video.
    pub fn video(&self, playlist_id: impl Display, video_id: impl Display) -> String {
        format!("{}/playlists/{playlist_id}/videos/{video_id}", self.api)
    }

    pub fn video_order(&self, playlist_id: impl Display) -> String {
        format!("{}/playlists/{playlist_id}/video-order", self.api)
    }

    pub fn reorder(&self, playlist_id: impl Display) -> String {
        format!("{}/playlists/{playlist_id}/reorder", self.api)
    }

    pub fn devices(&self, playlist_id: impl Display) -> String {
        format!("{}/playlists/{playlist_id}/devices", self.api)
    }

    /// Assign (POST) or unassign (DELETE) one device.
    pub fn device(&self, playlist_id: impl Display, device_id: &str) -> String {
        format!("{}/playlists/{playlist_id}/devices/{}", self.api, enc(device_id))
    }
}

pub struct DeviceEndpoints<'a> {
    api: &'a str,
}

impl DeviceEndpoints<'_> {
    pub fn list(&self) -> String {
        format!("{}/devices", self.api)
    }

    pub fn by_id(&self, device_id: &str) -> String {
        format!("{}/devices/{}", self.api, enc(device_id))
    }

    pub fn status(&self, device_id: &str) -> String {
        format!("{}/devices/{}/status", self.api, enc(device_id))
    }

    pub fn ping(&self, device_id: &str) -> String {
        format!("{}/devices/{}/ping", self.api, enc(device_id))
    }

    pub fn restart(&self, device_id: &str) -> String {
        format!("{}/devices/{}/restart", self.api, enc(device_id))
    }

    /// Route the server actually serves for restarts (POST).
    pub fn reboot(&self, device_id: &str) -> String {
        format!("{}/devices/{}/system/reboot", self.api, enc(device_id))
    }

    pub fn playlists(&self, device_id: &str) -> String {
        format!("{}/devices/{}/playlists", self.api, enc(device_id))
    }
}

pub struct DevicePlaylistEndpoints<'a> {
    api: &'a str,
}

impl DevicePlaylistEndpoints<'_> {
    /// List (GET) or assign (POST) assignments.
    pub fn list(&self) -> String {
        format!("{}/device-playlists", self.api)
    }

    pub fn unassign(&self, device_id: &str, playlist_id: impl Display) -> String {
        format!("{}/device-playlists/{}/{playlist_id}", self.api, enc(device_id))
    }

    pub fn by_device(&self, device_id: &str) -> String {
        format!("{}/device-playlists/device/{}", self.api, enc(device_id))
    }

    pub fn by_playlist(&self, playlist_id: impl Display) -> String {
        format!("{}/device-playlists/playlist/{playlist_id}", self.api)
    }

    pub fn playlist_devices(&self, playlist_id: impl Display) -> String {
        format!("{}/device-playlists/playlist/{playlist_id}/devices", self.api)
    }

    pub fn device_playlists(&self, device_id: &str) -> String {
        format!("{}/device-playlists/device/{}/playlists", self.api, enc(device_id))
    }
}

pub struct SystemEndpoints<'a> {
    api: &'a str,
}

impl SystemEndpoints<'_> {
    pub fn health(&self) -> String {
        format!("{}/health", self.api)
    }

    pub fn diagnostics(&self) -> String {
        format!("{}/diagnostics", self.api)
    }

    pub fn version(&self) -> String {
        format!("{}/version", self.api)
    }

    pub fn stats(&self) -> String {
        format!("{}/stats", self.api)
    }
}

pub struct StaticEndpoints<'a> {
    base: &'a str,
}

impl StaticEndpoints<'_> {
    pub fn images(&self) -> String {
        format!("{}/static/images", self.base)
    }

    pub fn css(&self) -> String {
        format!("{}/static/css", self.base)
    }

    pub fn js(&self) -> String {
        format!("{}/static/js", self.base)
    }

    pub fn uploads(&self) -> String {
        format!("{}/static/uploads", self.base)
    }

    pub fn thumbnails(&self) -> String {
        format!("{}/static/thumbnails", self.base)
    }
}

/// Append query parameters to `base`, skipping `None` values.
pub fn build_url(base: &str, params: &[(&str, Option<String>)]) -> Result<String, ApiError> {
    let mut url = Url::parse(base)
        .map_err(|e| ApiError::ConfigurationError(format!("Invalid URL '{base}': {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }
    // An empty serializer still leaves a trailing '?'.
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Location, detect_environment};

    fn endpoints() -> Endpoints {
        Endpoints::new(&detect_environment(&Location::new("https:", "app.example.com", None)))
    }

    #[test]
    fn resource_paths() {
        let e = endpoints();
        assert_eq!(e.videos().list(), "https://app.example.com/api/videos");
        assert_eq!(e.videos().by_id(12), "https://app.example.com/api/videos/12");
        assert_eq!(
            e.playlists().video_order(3),
            "https://app.example.com/api/playlists/3/video-order"
        );
        assert_eq!(
            e.playlists().video(3, 9),
            "https://app.example.com/api/playlists/3/videos/9"
        );
        assert_eq!(
            e.device_playlists().unassign("RPI-01", 4),
            "https://app.example.com/api/device-playlists/RPI-01/4"
        );
        assert_eq!(e.system().health(), "https://app.example.com/api/health");
        assert_eq!(e.auth().login(), "https://app.example.com/api/auth/login");
        assert_eq!(
            e.static_assets().thumbnails(),
            "https://app.example.com/static/thumbnails"
        );
    }

    #[test]
    fn static_assets_cover_console_table() {
        let binding = endpoints();
        let assets = binding.static_assets();
        assert_eq!(assets.images(), "https://app.example.com/static/images");
        assert_eq!(assets.css(), "https://app.example.com/static/css");
        assert_eq!(assets.js(), "https://app.example.com/static/js");
        assert_eq!(assets.uploads(), "https://app.example.com/static/uploads");
    }

    #[test]
    fn device_ids_are_encoded() {
        assert_eq!(
            endpoints().devices().status("store 7/a"),
            "https://app.example.com/api/devices/store%207%2Fa/status"
        );
    }

    #[test]
    fn build_url_skips_missing_values() {
        let url = build_url(
            "https://app.example.com/api/videos",
            &[
                ("limit", Some("50".to_string())),
                ("search", Some("mi video".to_string())),
                ("expired", None),
            ],
        )
        .unwrap();
        assert_eq!(url, "https://app.example.com/api/videos?limit=50&search=mi+video");

        let bare = build_url("https://app.example.com/api/videos", &[("x", None)]).unwrap();
        assert_eq!(bare, "https://app.example.com/api/videos");
    }

    #[test]
    fn build_url_rejects_relative_base() {
        assert!(matches!(
            build_url("/api/videos", &[]),
            Err(ApiError::ConfigurationError(_))
        ));
    }
}
