use iced::widget::image::Handle;

use crate::core::models::recognition::UploadResponse;
use crate::global_constants;

/// Which of the backend's three static-asset classes an artifact belongs
/// to. Each class lives under its own base path on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    UploadedImage,
    ProcessedImage,
    PlateCrop(usize),
}

impl ArtifactKind {
    pub fn base_path(&self) -> &'static str {
        match self {
            ArtifactKind::UploadedImage => global_constants::UPLOADED_IMAGE_BASE_PATH,
            ArtifactKind::ProcessedImage => global_constants::PROCESSED_IMAGE_BASE_PATH,
            ArtifactKind::PlateCrop(_) => global_constants::PLATE_CROP_BASE_PATH,
        }
    }
}

/// Builds the absolute URL for a server-generated artifact.
pub fn artifact_url(base_url: &str, kind: ArtifactKind, reference: &str) -> String {
    format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        kind.base_path(),
        reference
    )
}

/// One artifact reference from a response, plus its image bytes once the
/// follow-up fetch lands. The reference and URL are immutable; only the
/// handle is filled in later.
#[derive(Debug, Clone)]
pub struct ArtifactSlot {
    pub reference: String,
    pub url: String,
    pub image: Option<Handle>,
}

impl ArtifactSlot {
    fn new(base_url: &str, kind: ArtifactKind, reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            url: artifact_url(base_url, kind, reference),
            image: None,
        }
    }
}

/// One detected plate: the cropped region artifact and the text the
/// backend's OCR extracted from it.
#[derive(Debug, Clone)]
pub struct PlateDetection {
    pub crop: ArtifactSlot,
    pub extracted_text: String,
}

/// Everything a single successful upload produced, resolved against the
/// backend base URL that served it. Tagged with the upload's sequence
/// number so late artifact bytes for a superseded report can be dropped.
#[derive(Debug, Clone)]
pub struct PlateReport {
    pub sequence: u64,
    pub uploaded_image: ArtifactSlot,
    pub processed_image: ArtifactSlot,
    pub detections: Vec<PlateDetection>,
}

impl PlateReport {
    pub fn from_response(sequence: u64, base_url: &str, response: &UploadResponse) -> Self {
        let detections = response
            .detections
            .iter()
            .enumerate()
            .map(|(index, record)| PlateDetection {
                crop: ArtifactSlot::new(
                    base_url,
                    ArtifactKind::PlateCrop(index),
                    &record.cropped_plate,
                ),
                extracted_text: record.extracted_text.clone(),
            })
            .collect();

        Self {
            sequence,
            uploaded_image: ArtifactSlot::new(
                base_url,
                ArtifactKind::UploadedImage,
                &response.uploaded_image,
            ),
            processed_image: ArtifactSlot::new(
                base_url,
                ArtifactKind::ProcessedImage,
                &response.processed_image,
            ),
            detections,
        }
    }

    /// Text shown in the result panel: the first detection's extracted
    /// text. Absent when there are no detections or the text is empty.
    pub fn displayed_text(&self) -> Option<&str> {
        self.detections
            .first()
            .map(|detection| detection.extracted_text.as_str())
            .filter(|text| !text.is_empty())
    }

    pub fn slot(&self, kind: ArtifactKind) -> Option<&ArtifactSlot> {
        match kind {
            ArtifactKind::UploadedImage => Some(&self.uploaded_image),
            ArtifactKind::ProcessedImage => Some(&self.processed_image),
            ArtifactKind::PlateCrop(index) => {
                self.detections.get(index).map(|detection| &detection.crop)
            }
        }
    }

    pub fn slot_mut(&mut self, kind: ArtifactKind) -> Option<&mut ArtifactSlot> {
        match kind {
            ArtifactKind::UploadedImage => Some(&mut self.uploaded_image),
            ArtifactKind::ProcessedImage => Some(&mut self.processed_image),
            ArtifactKind::PlateCrop(index) => self
                .detections
                .get_mut(index)
                .map(|detection| &mut detection.crop),
        }
    }

    /// All artifacts this report references, in fetch order: uploaded
    /// image, processed image, then crops in response order.
    pub fn artifact_kinds(&self) -> Vec<ArtifactKind> {
        let mut kinds = vec![ArtifactKind::UploadedImage, ArtifactKind::ProcessedImage];
        kinds.extend((0..self.detections.len()).map(ArtifactKind::PlateCrop));
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::recognition::DetectionRecord;

    fn sample_response() -> UploadResponse {
        UploadResponse {
            uploaded_image: "abc.jpg".to_string(),
            processed_image: "abc_pred.jpg".to_string(),
            detections: vec![DetectionRecord {
                cropped_plate: "roi1.jpg".to_string(),
                extracted_text: "KA01AB1234".to_string(),
            }],
        }
    }

    #[test]
    fn test_artifact_url_joins_base_path_and_reference() {
        let url = artifact_url(
            "http://127.0.0.1:5000",
            ArtifactKind::UploadedImage,
            "abc.jpg",
        );
        assert_eq!(url, "http://127.0.0.1:5000/static/upload/abc.jpg");
    }

    #[test]
    fn test_artifact_url_tolerates_trailing_slash_on_base() {
        let url = artifact_url(
            "http://127.0.0.1:5000/",
            ArtifactKind::PlateCrop(0),
            "roi1.jpg",
        );
        assert_eq!(url, "http://127.0.0.1:5000/static/roi/roi1.jpg");
    }

    #[test]
    fn test_each_artifact_class_uses_its_own_base_path() {
        assert_eq!(ArtifactKind::UploadedImage.base_path(), "/static/upload/");
        assert_eq!(ArtifactKind::ProcessedImage.base_path(), "/static/predict/");
        assert_eq!(ArtifactKind::PlateCrop(3).base_path(), "/static/roi/");
    }

    #[test]
    fn test_report_resolves_all_references_against_base_url() {
        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &sample_response());

        assert_eq!(
            report.uploaded_image.url,
            "http://127.0.0.1:5000/static/upload/abc.jpg"
        );
        assert_eq!(
            report.processed_image.url,
            "http://127.0.0.1:5000/static/predict/abc_pred.jpg"
        );
        assert_eq!(
            report.detections[0].crop.url,
            "http://127.0.0.1:5000/static/roi/roi1.jpg"
        );
    }

    #[test]
    fn test_displayed_text_is_first_detection() {
        let mut response = sample_response();
        response.detections.push(DetectionRecord {
            cropped_plate: "roi2.jpg".to_string(),
            extracted_text: "MH12CD5678".to_string(),
        });

        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &response);
        assert_eq!(report.displayed_text(), Some("KA01AB1234"));
    }

    #[test]
    fn test_displayed_text_absent_without_detections() {
        let mut response = sample_response();
        response.detections.clear();

        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &response);
        assert_eq!(report.displayed_text(), None);
    }

    #[test]
    fn test_displayed_text_absent_when_first_detection_text_is_empty() {
        let mut response = sample_response();
        response.detections[0].extracted_text.clear();

        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &response);
        assert_eq!(report.displayed_text(), None);
    }

    #[test]
    fn test_artifact_kinds_lists_crops_in_response_order() {
        let mut response = sample_response();
        response.detections.push(DetectionRecord {
            cropped_plate: "roi2.jpg".to_string(),
            extracted_text: "MH12CD5678".to_string(),
        });

        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &response);
        assert_eq!(
            report.artifact_kinds(),
            vec![
                ArtifactKind::UploadedImage,
                ArtifactKind::ProcessedImage,
                ArtifactKind::PlateCrop(0),
                ArtifactKind::PlateCrop(1),
            ]
        );
    }

    #[test]
    fn test_slot_lookup_out_of_range_crop_is_none() {
        let report = PlateReport::from_response(1, "http://127.0.0.1:5000", &sample_response());
        assert!(report.slot(ArtifactKind::PlateCrop(5)).is_none());
    }
}
