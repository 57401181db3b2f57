use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::SelectedImage;

/// Source of user-picked image files. Yields `None` when the user cancels
/// the dialog, which leaves the previous selection in place.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick_image(&self) -> Result<Option<SelectedImage>>;
}
