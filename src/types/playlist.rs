use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::video::Video;

/// A playlist as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDateTime>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Store code the playlist belongs to
    #[serde(default)]
    pub id_tienda: Option<String>,
    #[serde(default)]
    pub creation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub video_count: Option<i64>,
    #[serde(default)]
    pub total_duration: Option<i64>,
    #[serde(default)]
    pub videos: Vec<Video>,
}

fn default_active() -> bool {
    true
}

/// Payload for creating a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDateTime>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tienda: Option<String>,
}

impl PlaylistCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_date: None,
            expiration_date: None,
            is_active: true,
            id_tienda: None,
        }
    }
}

/// Partial playlist update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_tienda: Option<String>,
}

/// Position of one video inside a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoOrder {
    pub video_id: i64,
    pub order: u32,
}

impl VideoOrder {
    /// Orders numbered from 1 following the given video sequence.
    pub fn sequence(video_ids: &[i64]) -> Vec<Self> {
        video_ids
            .iter()
            .zip(1..)
            .map(|(&video_id, order)| Self { video_id, order })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct VideoOrderPayload<'a> {
    pub videos: &'a [VideoOrder],
}
