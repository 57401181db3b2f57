use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::{SelectedImage, UploadResponse};

/// The remote license-plate recognition service. Detection, cropping and
/// OCR all happen on the other side of this trait; the client only moves
/// bytes out and references back.
///
/// The base URL is passed per call so that edits to the backend setting
/// take effect without rebuilding the adapter.
#[async_trait]
pub trait RecognitionBackend: Send + Sync {
    /// One advisory reachability check against the backend root. Any
    /// successful response counts; the body is ignored.
    async fn probe(&self, base_url: &str) -> Result<()>;

    /// Uploads the image as a single multipart `file` field and decodes
    /// the structured detection response.
    async fn upload_image(&self, base_url: &str, image: &SelectedImage)
        -> Result<UploadResponse>;

    /// Fetches the raw bytes of a server-generated artifact.
    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>>;
}
