use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A video in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub upload_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDateTime>,
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDateTime>,
}

/// Metadata sent alongside an uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoUpload {
    pub title: String,
    pub description: Option<String>,
    pub expiration_date: Option<NaiveDateTime>,
}

impl VideoUpload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Multipart text fields in submission order.
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("title".to_string(), self.title.clone())];
        if let Some(description) = &self.description {
            fields.push(("description".to_string(), description.clone()));
        }
        if let Some(expiration) = &self.expiration_date {
            fields.push((
                "expiration_date".to_string(),
                expiration.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ));
        }
        fields
    }
}
