//! Cloudinary signed-upload client.
//!
//! Uploads are multipart POSTs to `{api_base}/v1_1/{cloud}/{resource}/upload`
//! carrying the payload as a data URI. Requests are signed with SHA-256 over
//! the alphabetically sorted signed parameters followed by the API secret.

use std::time::Duration;

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{MediaError, MediaStore, UploadRequest, UploadedMedia};

/// Default API host.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Upper bound on a single upload round trip.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(110);

/// Credentials and endpoint for the Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
}

impl CloudinaryConfig {
    /// Load from environment variables.
    ///
    /// | Env var                  | Default                      |
    /// |--------------------------|------------------------------|
    /// | `CLOUDINARY_CLOUD_NAME`  | **required**                 |
    /// | `CLOUDINARY_API_KEY`     | **required**                 |
    /// | `CLOUDINARY_API_SECRET`  | **required**                 |
    /// | `CLOUDINARY_API_BASE`    | `https://api.cloudinary.com` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        let required = |name: &str| {
            std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
        };
        Self {
            cloud_name: required("CLOUDINARY_CLOUD_NAME"),
            api_key: required("CLOUDINARY_API_KEY"),
            api_secret: required("CLOUDINARY_API_SECRET"),
            api_base: std::env::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        }
    }

    fn upload_url(&self, resource_type: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name,
            resource_type
        )
    }
}

/// Compute the request signature for a set of signed parameters.
///
/// Parameters are sorted by name, joined as `k=v&k=v`, the secret is
/// appended, and the result is hex-encoded SHA-256.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha256::digest(format!("{to_sign}{api_secret}").as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`MediaStore`] backed by the Cloudinary upload API.
pub struct CloudinaryStore {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { http, config })
    }
}

#[async_trait::async_trait]
impl MediaStore for CloudinaryStore {
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", request.folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );
        let url = self.config.upload_url(request.resource_type.as_str());

        let form = reqwest::multipart::Form::new()
            .text("file", request.data_uri)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", request.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        tracing::debug!(
            folder = %request.folder,
            resource_type = request.resource_type.as_str(),
            "Uploading to media store"
        );

        let resp = self.http.post(&url).multipart(form).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), %message, "Media store rejected upload");
            return Err(MediaError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = serde_json::from_str(&text)
            .map_err(|e| MediaError::InvalidResponse(format!("{e} - body: {text}")))?;

        tracing::info!(public_id = %body.public_id, "Media uploaded");
        Ok(UploadedMedia {
            secure_url: body.secure_url,
            public_id: body.public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_base: base.to_string(),
        }
    }

    #[test]
    fn signature_matches_known_digest() {
        let sig = sign_params(
            &[("timestamp", "1700000000"), ("folder", "social_media_videos")],
            "secret",
        );
        assert_eq!(
            sig,
            "1c288d800a09a446af7f68eff64858893e30be9cf72fb203202aa431ac75f607"
        );
    }

    #[test]
    fn signature_ignores_param_order_and_empty_values() {
        let a = sign_params(&[("folder", "f"), ("timestamp", "1")], "s");
        let b = sign_params(&[("timestamp", "1"), ("public_id", ""), ("folder", "f")], "s");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn upload_url_per_resource_type() {
        let cfg = config("https://api.cloudinary.com/");
        assert_eq!(
            cfg.upload_url("video"),
            "https://api.cloudinary.com/v1_1/demo/video/upload"
        );
        assert_eq!(
            config("http://localhost:9000").upload_url("image"),
            "http://localhost:9000/v1_1/demo/image/upload"
        );
    }

    #[tokio::test]
    async fn unreachable_store_is_request_error() {
        let store = CloudinaryStore::new(config("http://127.0.0.1:1")).unwrap();
        let err = store
            .upload(UploadRequest {
                data_uri: crate::data_uri("image/png", b"x"),
                folder: "f".to_string(),
                resource_type: crate::ResourceType::Image,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Request(_)));
    }
}
