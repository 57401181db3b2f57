use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::core::interfaces::adapters::RecognitionBackend;
use crate::core::models::{SelectedImage, UploadResponse};
use crate::global_constants;

/// Talks to the recognition service over HTTP: one liveness endpoint, one
/// multipart upload endpoint, and plain GETs for the generated artifacts.
pub struct HttpRecognitionBackend {
    client: reqwest::Client,
}

impl HttpRecognitionBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn upload_url(base_url: &str) -> String {
        format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            global_constants::UPLOAD_ENDPOINT
        )
    }
}

impl Default for HttpRecognitionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecognitionBackend for HttpRecognitionBackend {
    async fn probe(&self, base_url: &str) -> Result<()> {
        log::debug!("[BACKEND] Probing {}", base_url);

        let response = self.client.get(base_url).send().await?;
        response.error_for_status()?;

        Ok(())
    }

    async fn upload_image(
        &self,
        base_url: &str,
        image: &SelectedImage,
    ) -> Result<UploadResponse> {
        let upload_url = Self::upload_url(base_url);
        log::info!("[BACKEND] POST {} ({})", upload_url, image.file_name);

        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone());
        let form = reqwest::multipart::Form::new().part(global_constants::UPLOAD_FIELD_NAME, part);

        let response = self.client.post(&upload_url).multipart(form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("[BACKEND] Upload response ({}): {}", status, body);

        if !status.is_success() {
            anyhow::bail!("backend responded with HTTP {}", status.as_u16());
        }

        let decoded: UploadResponse =
            serde_json::from_str(&body).context("decoding upload response body")?;

        Ok(decoded)
    }

    async fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("[BACKEND] GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }
}
