use std::path::Path;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::execution::http::transport::{FilePart, MultipartBody};
use crate::types::{Video, VideoUpdate, VideoUpload};

use super::collection;

/// Video library operations.
pub struct VideosApi<'a> {
    client: &'a ApiClient,
}

impl<'a> VideosApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Video>, ApiError> {
        let value = self.client.get(&self.client.endpoints().videos().list()).await?;
        collection(value, "videos")
    }

    pub async fn get(&self, id: i64) -> Result<Video, ApiError> {
        self.client
            .get_json(&self.client.endpoints().videos().by_id(id))
            .await
    }

    pub async fn update(&self, id: i64, update: &VideoUpdate) -> Result<Video, ApiError> {
        self.client
            .put_json(&self.client.endpoints().videos().by_id(id), update)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(&self.client.endpoints().videos().by_id(id))
            .await?;
        Ok(())
    }

    pub async fn upload(&self, file: FilePart, meta: &VideoUpload) -> Result<Video, ApiError> {
        let body = meta
            .fields()
            .into_iter()
            .fold(MultipartBody::new(file), |body, (k, v)| body.field(k, v));
        let value = self
            .client
            .upload(&self.client.endpoints().videos().upload(), body)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn upload_path(&self, path: impl AsRef<Path>, meta: &VideoUpload) -> Result<Video, ApiError> {
        let file = FilePart::from_path(path).await?;
        self.upload(file, meta).await
    }
}
