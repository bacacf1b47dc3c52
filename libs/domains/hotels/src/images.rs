//! Hotel image hosting.
//!
//! Uploads go to Cloudinary when it is configured. A mutation stages its
//! image first ([`StagedImage::stage`]); if the store write then fails, the
//! freshly uploaded image is discarded again.

use async_trait::async_trait;
use core_config::{ConfigError, env_optional, env_required};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image hosting is not configured")]
    NotConfigured,

    #[error("Image host request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Image host rejected the request: {0}")]
    Rejected(String),
}

/// An image file received from a form
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Store the image and return its public id
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageError>;

    /// Remove a stored image
    async fn discard(&self, public_id: String) -> Result<(), ImageError>;

    /// URL the browser loads the image from
    fn public_url(&self, public_id: &str) -> String;
}

/// Cloudinary account credentials
#[derive(Clone, Debug)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    /// `None` when `CLOUDINARY_NAME` is unset; otherwise `CLOUDINARY_API_KEY`
    /// and `CLOUDINARY_API_SECRET` are required.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(cloud_name) = env_optional("CLOUDINARY_NAME") else {
            return Ok(None);
        };

        Ok(Some(Self {
            cloud_name,
            api_key: env_required("CLOUDINARY_API_KEY")?,
            api_secret: env_required("CLOUDINARY_API_SECRET")?,
        }))
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Signed uploads to the Cloudinary upload API
pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    client: reqwest::Client,
    api_base: String,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
        }
    }

    /// Point at a different API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.api_base, self.config.cloud_name, action
        )
    }

    /// SHA-256 over the `&`-joined, key-sorted parameters followed by the secret
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        format!("{:x}", Sha256::digest(format!("{}{}", joined, self.config.api_secret)))
    }

    fn signed_form(&self, params: Vec<(&'static str, String)>) -> Form {
        let signature = self.sign(&params);
        params
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
    }

    async fn rejection(response: reqwest::Response) -> ImageError {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => ImageError::Rejected(body.error.message),
            Err(_) => ImageError::Rejected(format!("HTTP {}", status)),
        }
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut file = Part::bytes(image.bytes).file_name(image.file_name);
        if let Some(content_type) = image.content_type.as_deref() {
            file = file.mime_str(content_type)?;
        }
        let form = self
            .signed_form(vec![("timestamp", timestamp)])
            .part("file", file);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let uploaded: UploadResponse = response.json().await?;
        info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(uploaded.public_id)
    }

    #[instrument(skip(self))]
    async fn discard(&self, public_id: String) -> Result<(), ImageError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let form = self.signed_form(vec![("public_id", public_id), ("timestamp", timestamp)]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        Ok(())
    }

    fn public_url(&self, public_id: &str) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/upload/{}",
            self.config.cloud_name, public_id
        )
    }
}

/// Used when no image host is configured: every upload fails, so forms
/// without a file still work.
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(&self, _image: ImageUpload) -> Result<String, ImageError> {
        Err(ImageError::NotConfigured)
    }

    async fn discard(&self, _public_id: String) -> Result<(), ImageError> {
        Ok(())
    }

    fn public_url(&self, public_id: &str) -> String {
        format!("/public/images/{}", public_id)
    }
}

/// Outcome of the upload phase of a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum StagedImage {
    /// No file submitted; keep whatever the form says
    Unchanged,
    /// Uploaded and not yet referenced by a stored hotel
    Uploaded(String),
}

impl StagedImage {
    /// Upload the file, if any. Nothing is stored when this fails.
    pub async fn stage(
        host: &dyn ImageHost,
        upload: Option<ImageUpload>,
    ) -> Result<Self, ImageError> {
        match upload {
            Some(image) => Ok(StagedImage::Uploaded(host.upload(image).await?)),
            None => Ok(StagedImage::Unchanged),
        }
    }

    pub fn public_id(&self) -> Option<&str> {
        match self {
            StagedImage::Uploaded(id) => Some(id),
            StagedImage::Unchanged => None,
        }
    }

    /// Remove an uploaded image after the store write failed.
    ///
    /// Best effort: a failure here is logged and otherwise ignored.
    pub async fn discard(self, host: &dyn ImageHost) {
        if let StagedImage::Uploaded(public_id) = self {
            match host.discard(public_id.clone()).await {
                Ok(()) => info!(%public_id, "Discarded orphaned image"),
                Err(e) => warn!(%public_id, "Failed to discard orphaned image: {}", e),
            }
        }
    }
}
