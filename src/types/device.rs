use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Playlist reference embedded in a device record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDateTime>,
}

/// A registered playback device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<i64>,
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ip_address_lan: Option<String>,
    #[serde(default)]
    pub ip_address_wifi: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub wlan0_mac: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tienda: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub cpu_temp: Option<f64>,
    #[serde(default)]
    pub memory_usage: Option<f64>,
    #[serde(default)]
    pub disk_usage: Option<f64>,
    #[serde(default)]
    pub videoloop_status: Option<String>,
    #[serde(default)]
    pub kiosk_status: Option<String>,
    #[serde(default)]
    pub last_seen: Option<NaiveDateTime>,
    #[serde(default)]
    pub registered_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub playlists: Vec<PlaylistRef>,
}

/// Payload for registering a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceCreate {
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tienda: Option<String>,
}

/// Partial device update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address_lan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address_wifi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tienda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A device-playlist assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePlaylist {
    #[serde(default)]
    pub id: Option<i64>,
    pub device_id: String,
    pub playlist_id: i64,
    #[serde(default)]
    pub assigned_at: Option<NaiveDateTime>,
}

/// Payload for assigning a playlist to a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevicePlaylistCreate {
    pub device_id: String,
    pub playlist_id: i64,
}
