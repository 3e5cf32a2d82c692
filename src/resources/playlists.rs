use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    Device, Playlist, PlaylistCreate, PlaylistUpdate, Video, VideoOrder, VideoOrderPayload,
};

use super::collection;

/// Playlist operations, including video ordering and device assignment.
pub struct PlaylistsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PlaylistsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Playlist>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().playlists().list())
            .await?;
        collection(value, "playlists")
    }

    pub async fn get(&self, id: i64) -> Result<Playlist, ApiError> {
        self.client
            .get_json(&self.client.endpoints().playlists().by_id(id))
            .await
    }

    pub async fn create(&self, playlist: &PlaylistCreate) -> Result<Playlist, ApiError> {
        self.client
            .post_json(&self.client.endpoints().playlists().list(), playlist)
            .await
    }

    pub async fn update(&self, id: i64, update: &PlaylistUpdate) -> Result<Playlist, ApiError> {
        self.client
            .put_json(&self.client.endpoints().playlists().by_id(id), update)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&self.client.endpoints().playlists().by_id(id))
            .await?;
        Ok(())
    }

    pub async fn videos(&self, id: i64) -> Result<Vec<Video>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().playlists().videos(id))
            .await?;
        collection(value, "videos")
    }

    pub async fn add_video(&self, id: i64, video_id: i64) -> Result<(), ApiError> {
        self.client
            .post_empty(&self.client.endpoints().playlists().video(id, video_id))
            .await?;
        Ok(())
    }

    pub async fn remove_video(&self, id: i64, video_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&self.client.endpoints().playlists().video(id, video_id))
            .await?;
        Ok(())
    }

    /// Persist a new video order (`{"videos": [{"video_id", "order"}]}`).
    pub async fn update_video_order(&self, id: i64, order: &[VideoOrder]) -> Result<(), ApiError> {
        self.client
            .put(
                &self.client.endpoints().playlists().video_order(id),
                &VideoOrderPayload { videos: order },
            )
            .await?;
        Ok(())
    }

    pub async fn devices(&self, id: i64) -> Result<Vec<Device>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().playlists().devices(id))
            .await?;
        collection(value, "devices")
    }

    pub async fn assign_device(&self, id: i64, device_id: &str) -> Result<(), ApiError> {
        self.client
            .post_empty(&self.client.endpoints().playlists().device(id, device_id))
            .await?;
        Ok(())
    }

    pub async fn unassign_device(&self, id: i64, device_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&self.client.endpoints().playlists().device(id, device_id))
            .await?;
        Ok(())
    }
}
