//! Typed resource access
//!
//! Thin, borrowed handles over [`ApiClient`] that pair the endpoint catalog
//! with the resource types. Everything goes through the client's wrappers, so
//! retries, interceptors and error extraction apply unchanged.

mod assignments;
mod devices;
mod playlists;
mod videos;

pub use assignments::AssignmentsApi;
pub use devices::DevicesApi;
pub use playlists::PlaylistsApi;
pub use videos::VideosApi;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub fn videos(&self) -> VideosApi<'_> {
        VideosApi::new(self)
    }

    pub fn playlists(&self) -> PlaylistsApi<'_> {
        PlaylistsApi::new(self)
    }

    pub fn devices(&self) -> DevicesApi<'_> {
        DevicesApi::new(self)
    }

    pub fn assignments(&self) -> AssignmentsApi<'_> {
        AssignmentsApi::new(self)
    }
}

/// Decode a list that the API returns either bare or wrapped as `{ key: [...] }`.
pub(crate) fn collection<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(items) => Ok(serde_json::from_value(items)?),
            None => Err(ApiError::ParseError(format!(
                "expected a list or an object with '{key}'"
            ))),
        },
        other => Ok(serde_json::from_value(other)?),
    }
}
