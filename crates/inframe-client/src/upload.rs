//! Asset uploads to the third-party host
//!
//! Size and type checks run before any network call: images up to 5 MiB,
//! PDFs up to 10 MiB, everything else rejected.

use std::path::Path;

use async_trait::async_trait;
use inframe_api::UploadResponse;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};

use crate::config::UploadConfig;
use crate::error::{ApiError, Result};
use crate::http::execute;
use crate::normalize::{Failure, normalize, unwrap_envelope};

/// Largest accepted image
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Largest accepted PDF
pub const MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;

/// Placeholder in the upload URL replaced by the host resource type
const RESOURCE_TYPE_PLACEHOLDER: &str = "{resource_type}";

/// Accepted asset families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Pdf,
}

impl AssetKind {
    /// Classify a MIME type
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/pdf" {
            Some(Self::Pdf)
        } else if essence.strip_prefix("image/").is_some_and(|sub| !sub.is_empty()) {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// Size limit in bytes
    pub fn max_bytes(self) -> u64 {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Pdf => MAX_PDF_BYTES,
        }
    }

    /// Resource type segment understood by the asset host
    pub fn resource_type(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "raw",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Pdf => "PDF",
        }
    }
}

/// MIME type for a file name, from its extension
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(content_type)
}

/// Client-side checks for an asset
///
/// # Errors
/// Returns a validation error for unsupported types or oversized files.
pub fn check_asset(content_type: &str, len: u64) -> Result<AssetKind> {
    let kind = AssetKind::from_content_type(content_type)
        .ok_or_else(|| ApiError::rejected("Only image and PDF files can be uploaded."))?;

    if len > kind.max_bytes() {
        let limit_mb = kind.max_bytes() / (1024 * 1024);
        return Err(ApiError::rejected(format!(
            "{} exceeds the {limit_mb} MB size limit.",
            kind.label()
        )));
    }
    Ok(kind)
}

/// A file ready to upload
#[derive(Debug, Clone)]
pub struct Asset {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Asset {
    /// Build an asset from memory
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an asset from disk
    ///
    /// The content type comes from the extension, and the size limit is
    /// checked against file metadata before the contents are read.
    ///
    /// # Errors
    /// Returns a validation error for unsupported or oversized files, or an
    /// unexpected error if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content_type = content_type_for(path)
            .ok_or_else(|| ApiError::rejected("Only image and PDF files can be uploaded."))?;

        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            normalize(Failure::local(format!("cannot read {}: {e}", path.display())))
        })?;
        check_asset(content_type, metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            normalize(Failure::local(format!("cannot read {}: {e}", path.display())))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::new(file_name, content_type, bytes))
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Destination for uploaded assets
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload an asset and return where it is stored
    async fn upload(&self, asset: Asset) -> Result<UploadResponse>;
}

/// Uploads to the configured asset host as a multipart form
#[derive(Debug, Clone)]
pub struct HostedUploader {
    client: Client,
    config: UploadConfig,
}

impl HostedUploader {
    /// Create an uploader
    pub fn new(config: UploadConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an uploader with a custom `reqwest::Client`
    pub fn with_client(config: UploadConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn credentials(&self) -> Result<(&str, &str, &str)> {
        fn required<'a>(value: Option<&'a String>, what: &str) -> Result<&'a str> {
            value
                .map(String::as_str)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| normalize(Failure::local(format!("{what} is not configured"))))
        }

        Ok((
            required(self.config.url.as_ref(), "upload URL")?,
            required(self.config.upload_preset.as_ref(), "upload preset")?,
            required(self.config.api_key.as_ref(), "upload API key")?,
        ))
    }
}

#[async_trait]
impl AssetStore for HostedUploader {
    async fn upload(&self, asset: Asset) -> Result<UploadResponse> {
        let len = asset.len();
        let kind = check_asset(&asset.content_type, len)?;
        let (url, preset, api_key) = self.credentials()?;
        let url = url.replace(RESOURCE_TYPE_PLACEHOLDER, kind.resource_type());

        let part = Part::bytes(asset.bytes)
            .file_name(asset.file_name.clone())
            .mime_str(&asset.content_type)
            .map_err(|e| normalize(Failure::from_reqwest(e)))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", preset.to_string())
            .text("api_key", api_key.to_string());

        tracing::info!(file = %asset.file_name, bytes = len, "uploading asset");
        let request = self.client.post(&url).multipart(form);
        let body = execute(request, &Method::POST, &url).await?;
        unwrap_envelope(body)
    }
}
