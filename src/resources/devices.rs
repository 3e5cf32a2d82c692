use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Device, DeviceCreate, DeviceUpdate, Playlist};

use super::collection;

/// Device registry operations.
pub struct DevicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DevicesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Device>, ApiError> {
        let value = self.client.get(&self.client.endpoints().devices().list()).await?;
        collection(value, "devices")
    }

    pub async fn get(&self, device_id: &str) -> Result<Device, ApiError> {
        self.client
            .get_json(&self.client.endpoints().devices().by_id(device_id))
            .await
    }

    pub async fn create(&self, device: &DeviceCreate) -> Result<Device, ApiError> {
        self.client
            .post_json(&self.client.endpoints().devices().list(), device)
            .await
    }

    pub async fn update(&self, device_id: &str, update: &DeviceUpdate) -> Result<Device, ApiError> {
        self.client
            .put_json(&self.client.endpoints().devices().by_id(device_id), update)
            .await
    }

    pub async fn delete(&self, device_id: &str) -> Result<(), ApiError> {
        self.client
            .delete(&self.client.endpoints().devices().by_id(device_id))
            .await?;
        Ok(())
    }

    /// Raw status document; its shape varies with the device firmware.
    pub async fn status(&self, device_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&self.client.endpoints().devices().status(device_id))
            .await
    }

    pub async fn ping(&self, device_id: &str) -> Result<Value, ApiError> {
        self.client
            .get(&self.client.endpoints().devices().ping(device_id))
            .await
    }

    /// Reboot the device through the server's `system/reboot` route.
    pub async fn restart(&self, device_id: &str) -> Result<Value, ApiError> {
        self.client
            .post_empty(&self.client.endpoints().devices().reboot(device_id))
            .await
    }

    pub async fn playlists(&self, device_id: &str) -> Result<Vec<Playlist>, ApiError> {
        let value = self
            .client
            .get(&self.client.endpoints().devices().playlists(device_id))
            .await?;
        collection(value, "playlists")
    }
}
