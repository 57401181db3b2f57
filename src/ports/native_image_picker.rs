use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::core::interfaces::ports::ImagePicker;
use crate::core::models::SelectedImage;
use crate::global_constants;

/// Native file dialog backed by rfd. Reads the picked file into memory
/// and sanity-checks that it actually looks like an image before handing
/// it to the session.
pub struct NativeImagePicker;

impl NativeImagePicker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NativeImagePicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImagePicker for NativeImagePicker {
    async fn pick_image(&self) -> Result<Option<SelectedImage>> {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_title("Choose an image to upload")
            .add_filter("Images", global_constants::SUPPORTED_IMAGE_EXTENSIONS)
            .pick_file()
            .await
        else {
            log::debug!("[PICKER] Dialog cancelled");
            return Ok(None);
        };

        let path = handle.path().to_path_buf();
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;

        image::guess_format(&bytes)
            .with_context(|| format!("{} is not a recognizable image", path.display()))?;

        let image = SelectedImage::from_path(&path, bytes);
        log::info!(
            "[PICKER] Picked {} ({} bytes)",
            image.file_name,
            image.size_bytes()
        );

        Ok(Some(image))
    }
}
