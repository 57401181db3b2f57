use serde::Deserialize;

/// Wire shape of one detection as returned by the backend's `/upload`
/// endpoint. `cropped_plate` is a filename resolvable under the ROI static
/// path; `extracted_text` is whatever the server-side OCR read off it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionRecord {
    pub cropped_plate: String,
    pub extracted_text: String,
}

/// Wire shape of a successful `/upload` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub uploaded_image: String,
    pub processed_image: String,
    #[serde(default)]
    pub detections: Vec<DetectionRecord>,
}
