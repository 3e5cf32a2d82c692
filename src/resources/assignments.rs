use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{DevicePlaylist, DevicePlaylistCreate};

use super::collection;

/// Device-playlist assignment operations.
pub struct AssignmentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AssignmentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<DevicePlaylist>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().device_playlists().list())
            .await?;
        collection(value, "assignments")
    }

    pub async fn assign(&self, device_id: &str, playlist_id: i64) -> Result<DevicePlaylist, ApiError> {
        let payload = DevicePlaylistCreate {
            device_id: device_id.to_string(),
            playlist_id,
        };
        self.client
            .post_json(&self.client.endpoints().device_playlists().list(), &payload)
            .await
    }

    pub async fn unassign(&self, device_id: &str, playlist_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(
                &self
                    .client
                    .endpoints()
                    .device_playlists()
                    .unassign(device_id, playlist_id),
            )
            .await?;
        Ok(())
    }

    pub async fn by_device(&self, device_id: &str) -> Result<Vec<DevicePlaylist>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().device_playlists().by_device(device_id))
            .await?;
        collection(value, "assignments")
    }

    pub async fn by_playlist(&self, playlist_id: i64) -> Result<Vec<DevicePlaylist>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().device_playlists().by_playlist(playlist_id))
            .await?;
        collection(value, "assignments")
    }
}
