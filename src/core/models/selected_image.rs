use std::path::Path;

/// A locally picked image, held in memory until the user uploads it.
/// Picking a new file replaces it; nothing ever clears it.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file_name: String, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    pub fn from_path(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.jpg".to_string());

        Self { file_name, bytes }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
