//! Media store abstraction.
//!
//! Handlers depend on [`MediaStore`] only; [`cloudinary::CloudinaryStore`]
//! is the production implementation and tests substitute an in-memory one.

use base64::Engine;

pub mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore};

/// Kind of asset being stored. Selects the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Video,
    Image,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Image => "image",
        }
    }
}

/// A single upload: the payload as a data URI plus its destination folder.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub data_uri: String,
    pub folder: String,
    pub resource_type: ResourceType,
}

/// Where the store put the asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub secure_url: String,
    pub public_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Transport failure talking to the store.
    #[error("Media store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The store answered 2xx with a body we could not use.
    #[error("Unexpected media store response: {0}")]
    InvalidResponse(String),
}

/// Persists binary assets and returns a public URL for them.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia, MediaError>;
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{payload}")
}
