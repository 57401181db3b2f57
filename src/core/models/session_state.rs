use iced::widget::image::Handle;
use thiserror::Error;

use crate::core::models::report::{ArtifactKind, PlateReport};
use crate::core::models::selected_image::SelectedImage;

/// Errors surfaced to the user through the result view, rather than
/// swallowed into the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Select an image before uploading")]
    NoImageSelected,
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    #[error("Backend returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// Single source of truth for the upload workflow. Only the session
/// orchestrator writes to it; the views just read.
///
/// A successful upload replaces the report wholesale. A failed upload
/// records an error and leaves the report fully intact, so the user keeps
/// seeing the last good result.
#[derive(Debug, Default)]
pub struct SessionState {
    selected: Option<SelectedImage>,
    report: Option<PlateReport>,
    error: Option<SessionError>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection. Whether the previous report is
    /// cleared alongside it is a user setting; the original behavior keeps
    /// stale results on screen next to a not-yet-uploaded file.
    pub fn select_image(&mut self, image: SelectedImage, clear_previous_results: bool) {
        if clear_previous_results {
            self.report = None;
        }
        self.error = None;
        self.selected = Some(image);
    }

    /// Applies a successful upload outcome as one atomic transition: the
    /// report is replaced wholesale and any prior error is cleared. The
    /// views can never observe artifacts and text from different uploads.
    pub fn apply_report(&mut self, report: PlateReport) {
        self.error = None;
        self.report = Some(report);
    }

    /// Records a failure. Nothing else changes.
    pub fn record_error(&mut self, error: SessionError) {
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Attaches fetched image bytes to an artifact slot of the current
    /// report. Bytes that belong to a superseded report are dropped.
    pub fn attach_artifact(&mut self, sequence: u64, kind: ArtifactKind, handle: Handle) -> bool {
        let Some(report) = self.report.as_mut().filter(|r| r.sequence == sequence) else {
            return false;
        };

        match report.slot_mut(kind) {
            Some(slot) => {
                slot.image = Some(handle);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn report(&self) -> Option<&PlateReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn displayed_text(&self) -> Option<&str> {
        self.report.as_ref().and_then(PlateReport::displayed_text)
    }
}
