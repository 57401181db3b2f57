use std::sync::Arc;

use iced::widget::image::Handle;
use iced::{Element, Task};

use crate::core::interfaces::adapters::RecognitionBackend;
use crate::core::interfaces::ports::ImagePicker;
use crate::core::models::{
    ArtifactKind, PlateReport, SelectedImage, SessionError, SessionState, UploadResponse,
    UploadTracker,
};
use crate::presentation::main_view;
use crate::user_settings::{ThemeMode, UserSettings};

/// Outcome of the startup liveness probe. Advisory only: it is shown in
/// the status row and never gates the upload workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Probing,
    Reachable,
    Unreachable(String),
}

#[derive(Clone)]
pub enum SessionMessage {
    ProbeCompleted(Result<(), String>),
    PickImage,
    ImagePicked(Result<Option<SelectedImage>, String>),
    UploadPressed,
    /// Success carries the base URL the upload was issued against, so
    /// artifact URLs cannot resolve against a later-edited setting.
    UploadCompleted(u64, Result<(String, UploadResponse), SessionError>),
    ArtifactFetched(u64, ArtifactKind, Result<Vec<u8>, String>),
    DismissError,
    BackendUrlEdited(String),
    ClearOnSelectToggled(bool),
    ThemeModeSelected(ThemeMode),
    SaveSettings,
}

impl std::fmt::Debug for SessionMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMessage::ProbeCompleted(result) => {
                write!(f, "ProbeCompleted(ok: {})", result.is_ok())
            }
            SessionMessage::PickImage => write!(f, "PickImage"),
            SessionMessage::ImagePicked(result) => match result {
                Ok(Some(image)) => write!(f, "ImagePicked({})", image.file_name),
                Ok(None) => write!(f, "ImagePicked(cancelled)"),
                Err(e) => write!(f, "ImagePicked(error: {})", e),
            },
            SessionMessage::UploadPressed => write!(f, "UploadPressed"),
            SessionMessage::UploadCompleted(sequence, result) => {
                write!(f, "UploadCompleted(#{}, ok: {})", sequence, result.is_ok())
            }
            SessionMessage::ArtifactFetched(sequence, kind, result) => {
                write!(
                    f,
                    "ArtifactFetched(#{}, {:?}, ok: {})",
                    sequence,
                    kind,
                    result.is_ok()
                )
            }
            SessionMessage::DismissError => write!(f, "DismissError"),
            SessionMessage::BackendUrlEdited(url) => write!(f, "BackendUrlEdited({})", url),
            SessionMessage::ClearOnSelectToggled(flag) => {
                write!(f, "ClearOnSelectToggled({})", flag)
            }
            SessionMessage::ThemeModeSelected(mode) => write!(f, "ThemeModeSelected({})", mode),
            SessionMessage::SaveSettings => write!(f, "SaveSettings"),
        }
    }
}

/// Drives the whole upload workflow. Sole writer of the session state;
/// the views only ever read it through `update`'s re-render.
pub struct SessionOrchestrator {
    backend: Arc<dyn RecognitionBackend>,
    picker: Arc<dyn ImagePicker>,
    session: SessionState,
    uploads: UploadTracker,
    backend_status: BackendStatus,
    settings: UserSettings,
}

impl SessionOrchestrator {
    pub fn build(
        backend: Arc<dyn RecognitionBackend>,
        picker: Arc<dyn ImagePicker>,
        settings: UserSettings,
    ) -> Self {
        Self {
            backend,
            picker,
            session: SessionState::new(),
            uploads: UploadTracker::new(),
            backend_status: BackendStatus::Probing,
            settings,
        }
    }

    /// The one startup task: a single liveness probe. No retry, no
    /// periodic re-check.
    pub fn start(&self) -> Task<SessionMessage> {
        let backend = Arc::clone(&self.backend);
        let base_url = self.settings.backend_base_url.clone();

        log::info!("[ORCHESTRATOR] Probing backend at {}", base_url);

        Task::perform(
            async move { backend.probe(&base_url).await.map_err(|e| e.to_string()) },
            SessionMessage::ProbeCompleted,
        )
    }

    pub fn update(&mut self, message: SessionMessage) -> Task<SessionMessage> {
        log::debug!("[ORCHESTRATOR] Received message: {:?}", message);

        match message {
            SessionMessage::ProbeCompleted(result) => {
                self.handle_probe_completed(result);
                Task::none()
            }
            SessionMessage::PickImage => self.handle_pick_image(),
            SessionMessage::ImagePicked(result) => {
                self.handle_image_picked(result);
                Task::none()
            }
            SessionMessage::UploadPressed => self.handle_upload_pressed(),
            SessionMessage::UploadCompleted(sequence, result) => {
                self.handle_upload_completed(sequence, result)
            }
            SessionMessage::ArtifactFetched(sequence, kind, result) => {
                self.handle_artifact_fetched(sequence, kind, result);
                Task::none()
            }
            SessionMessage::DismissError => {
                self.session.clear_error();
                Task::none()
            }
            SessionMessage::BackendUrlEdited(url) => {
                self.settings.backend_base_url = url;
                Task::none()
            }
            SessionMessage::ClearOnSelectToggled(flag) => {
                self.settings.clear_results_on_new_selection = flag;
                Task::none()
            }
            SessionMessage::ThemeModeSelected(mode) => {
                self.settings.theme_mode = mode;
                Task::none()
            }
            SessionMessage::SaveSettings => {
                if let Err(e) = self.settings.save() {
                    log::error!("[ORCHESTRATOR] Failed to save settings: {}", e);
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, SessionMessage> {
        main_view(
            &self.session,
            &self.backend_status,
            &self.settings,
            self.uploads.in_flight(),
        )
    }

    pub fn theme_mode(&self) -> &ThemeMode {
        &self.settings.theme_mode
    }

    fn handle_probe_completed(&mut self, result: Result<(), String>) {
        self.backend_status = match result {
            Ok(()) => {
                log::info!("[ORCHESTRATOR] Backend is reachable");
                BackendStatus::Reachable
            }
            Err(reason) => {
                // Non-fatal: uploads stay enabled either way.
                log::error!("[ORCHESTRATOR] Backend probe failed: {}", reason);
                BackendStatus::Unreachable(reason)
            }
        };
    }

    fn handle_pick_image(&self) -> Task<SessionMessage> {
        let picker = Arc::clone(&self.picker);

        Task::perform(
            async move { picker.pick_image().await.map_err(|e| e.to_string()) },
            SessionMessage::ImagePicked,
        )
    }

    fn handle_image_picked(&mut self, result: Result<Option<SelectedImage>, String>) {
        match result {
            Ok(Some(image)) => {
                log::info!(
                    "[ORCHESTRATOR] Selected {} ({} bytes)",
                    image.file_name,
                    image.size_bytes()
                );
                self.session
                    .select_image(image, self.settings.clear_results_on_new_selection);
            }
            Ok(None) => {
                log::debug!("[ORCHESTRATOR] File dialog cancelled, keeping previous selection");
            }
            Err(reason) => {
                log::error!("[ORCHESTRATOR] File dialog failed: {}", reason);
            }
        }
    }

    fn handle_upload_pressed(&mut self) -> Task<SessionMessage> {
        let Some(image) = self.session.selected().cloned() else {
            log::warn!("[ORCHESTRATOR] Upload requested with no image selected");
            self.session.record_error(SessionError::NoImageSelected);
            return Task::none();
        };

        let sequence = self.uploads.begin();
        let backend = Arc::clone(&self.backend);
        let base_url = self.settings.backend_base_url.clone();

        log::info!(
            "[ORCHESTRATOR] Upload #{}: sending {} ({} bytes)",
            sequence,
            image.file_name,
            image.size_bytes()
        );

        Task::perform(
            async move {
                backend
                    .upload_image(&base_url, &image)
                    .await
                    .map(|response| (base_url, response))
                    .map_err(classify_upload_error)
            },
            move |result| SessionMessage::UploadCompleted(sequence, result),
        )
    }

    fn handle_upload_completed(
        &mut self,
        sequence: u64,
        result: Result<(String, UploadResponse), SessionError>,
    ) -> Task<SessionMessage> {
        self.uploads.finish(sequence);

        match result {
            Ok((base_url, response)) => {
                if !self.uploads.is_current(sequence) {
                    // A later upload already landed; applying this one
                    // would regress the session to an older request.
                    log::warn!(
                        "[ORCHESTRATOR] Discarding stale response for upload #{}",
                        sequence
                    );
                    return Task::none();
                }
                self.uploads.mark_applied(sequence);

                let report = PlateReport::from_response(sequence, &base_url, &response);
                log::info!(
                    "[ORCHESTRATOR] Upload #{} succeeded with {} detection(s)",
                    sequence,
                    report.detections.len()
                );

                let fetches: Vec<Task<SessionMessage>> = report
                    .artifact_kinds()
                    .into_iter()
                    .filter_map(|kind| {
                        report
                            .slot(kind)
                            .map(|slot| self.fetch_artifact_task(sequence, kind, slot.url.clone()))
                    })
                    .collect();

                self.session.apply_report(report);
                Task::batch(fetches)
            }
            Err(error) => {
                log::error!("[ORCHESTRATOR] Upload #{} failed: {}", sequence, error);
                if self.uploads.is_current(sequence) {
                    // A failure advances the watermark too: an older
                    // upload's success arriving after it must not revive
                    // an outdated report and mask this error.
                    self.uploads.mark_applied(sequence);
                    self.session.record_error(error);
                }
                Task::none()
            }
        }
    }

    fn fetch_artifact_task(
        &self,
        sequence: u64,
        kind: ArtifactKind,
        url: String,
    ) -> Task<SessionMessage> {
        let backend = Arc::clone(&self.backend);

        Task::perform(
            async move { backend.fetch_artifact(&url).await.map_err(|e| e.to_string()) },
            move |result| SessionMessage::ArtifactFetched(sequence, kind, result),
        )
    }

    fn handle_artifact_fetched(
        &mut self,
        sequence: u64,
        kind: ArtifactKind,
        result: Result<Vec<u8>, String>,
    ) {
        match result {
            Ok(bytes) => {
                let attached = self
                    .session
                    .attach_artifact(sequence, kind, Handle::from_bytes(bytes));
                if !attached {
                    log::debug!(
                        "[ORCHESTRATOR] Dropping artifact bytes for superseded upload #{}",
                        sequence
                    );
                }
            }
            Err(reason) => {
                // The slot keeps showing its URL; the panel itself stays up.
                log::warn!(
                    "[ORCHESTRATOR] Failed to fetch {:?} for upload #{}: {}",
                    kind,
                    sequence,
                    reason
                );
            }
        }
    }
}

/// Maps an adapter failure onto the error surfaced in the session: decode
/// failures are reported as malformed responses, everything else as a
/// plain upload failure.
fn classify_upload_error(error: anyhow::Error) -> SessionError {
    if error.downcast_ref::<serde_json::Error>().is_some() {
        SessionError::MalformedResponse(error.to_string())
    } else {
        SessionError::UploadFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    use crate::core::models::DetectionRecord;

    struct StubBackend;

    #[async_trait]
    impl RecognitionBackend for StubBackend {
        async fn probe(&self, _base_url: &str) -> Result<()> {
            Ok(())
        }

        async fn upload_image(
            &self,
            _base_url: &str,
            _image: &SelectedImage,
        ) -> Result<UploadResponse> {
            anyhow::bail!("stub backend is never called in these tests")
        }

        async fn fetch_artifact(&self, _url: &str) -> Result<Vec<u8>> {
            anyhow::bail!("stub backend is never called in these tests")
        }
    }

    struct StubPicker;

    #[async_trait]
    impl ImagePicker for StubPicker {
        async fn pick_image(&self) -> Result<Option<SelectedImage>> {
            Ok(None)
        }
    }

    fn orchestrator() -> SessionOrchestrator {
        SessionOrchestrator::build(
            Arc::new(StubBackend),
            Arc::new(StubPicker),
            UserSettings::default(),
        )
    }

    fn picked(file_name: &str) -> SessionMessage {
        SessionMessage::ImagePicked(Ok(Some(SelectedImage::new(
            file_name.to_string(),
            vec![0xFF, 0xD8, 0xFF],
        ))))
    }

    fn response(uploaded: &str, text: &str) -> UploadResponse {
        UploadResponse {
            uploaded_image: uploaded.to_string(),
            processed_image: format!("pred_{}", uploaded),
            detections: vec![DetectionRecord {
                cropped_plate: format!("plate_{}", uploaded),
                extracted_text: text.to_string(),
            }],
        }
    }

    const BASE_URL: &str = "http://127.0.0.1:5000";

    fn completed(sequence: u64, response: UploadResponse) -> SessionMessage {
        SessionMessage::UploadCompleted(sequence, Ok((BASE_URL.to_string(), response)))
    }

    #[test]
    fn test_upload_without_selection_surfaces_warning_and_sends_nothing() {
        let mut orchestrator = orchestrator();

        let _ = orchestrator.update(SessionMessage::UploadPressed);

        assert_eq!(
            orchestrator.session.error(),
            Some(&SessionError::NoImageSelected)
        );
        assert!(orchestrator.session.report().is_none());
        assert_eq!(orchestrator.uploads.in_flight(), 0);
    }

    #[test]
    fn test_successful_upload_applies_report_atomically() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));
        let _ = orchestrator.update(SessionMessage::UploadPressed);

        let _ = orchestrator.update(completed(1, response("abc.jpg", "KA01AB1234")));

        let report = orchestrator.session.report().unwrap();
        assert_eq!(report.uploaded_image.reference, "abc.jpg");
        assert_eq!(report.processed_image.reference, "pred_abc.jpg");
        assert_eq!(report.detections[0].crop.reference, "plate_abc.jpg");
        assert_eq!(orchestrator.session.displayed_text(), Some("KA01AB1234"));
    }

    #[test]
    fn test_failed_upload_leaves_previous_report_untouched() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(1, response("abc.jpg", "KA01AB1234")));

        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(SessionMessage::UploadCompleted(
            2,
            Err(SessionError::UploadFailed("HTTP 500".to_string())),
        ));

        let report = orchestrator.session.report().unwrap();
        assert_eq!(report.sequence, 1);
        assert_eq!(report.uploaded_image.reference, "abc.jpg");
        assert_eq!(orchestrator.session.displayed_text(), Some("KA01AB1234"));
        assert_eq!(
            orchestrator.session.error(),
            Some(&SessionError::UploadFailed("HTTP 500".to_string()))
        );
    }

    #[test]
    fn test_empty_detections_keep_images_and_drop_text() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(1, response("abc.jpg", "KA01AB1234")));

        let mut empty = response("next.jpg", "");
        empty.detections.clear();
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(2, empty));

        let report = orchestrator.session.report().unwrap();
        assert_eq!(report.uploaded_image.reference, "next.jpg");
        assert!(report.detections.is_empty());
        assert_eq!(orchestrator.session.displayed_text(), None);
    }

    #[test]
    fn test_overlapping_uploads_newer_issue_wins_regardless_of_arrival_order() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));

        // Upload A (#1) then B (#2); B resolves first.
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(2, response("b.jpg", "BBB")));
        let _ = orchestrator.update(completed(1, response("a.jpg", "AAA")));

        // A's late response is discarded instead of overwriting B's.
        let report = orchestrator.session.report().unwrap();
        assert_eq!(report.sequence, 2);
        assert_eq!(report.uploaded_image.reference, "b.jpg");
        assert_eq!(orchestrator.session.displayed_text(), Some("BBB"));
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_success() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));

        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(2, response("b.jpg", "BBB")));
        let _ = orchestrator.update(SessionMessage::UploadCompleted(
            1,
            Err(SessionError::UploadFailed("timed out".to_string())),
        ));

        assert!(orchestrator.session.error().is_none());
        assert_eq!(
            orchestrator.session.report().unwrap().uploaded_image.reference,
            "b.jpg"
        );
    }

    #[test]
    fn test_stale_success_does_not_revive_report_after_newer_failure() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));

        // Upload A (#1) then B (#2); B fails first, then A's success
        // arrives late.
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(SessionMessage::UploadCompleted(
            2,
            Err(SessionError::UploadFailed("HTTP 500".to_string())),
        ));
        let _ = orchestrator.update(completed(1, response("a.jpg", "AAA")));

        // A's outdated report must not land, and B's error must stay up.
        assert!(orchestrator.session.report().is_none());
        assert_eq!(
            orchestrator.session.error(),
            Some(&SessionError::UploadFailed("HTTP 500".to_string()))
        );
    }

    #[test]
    fn test_report_urls_resolve_against_base_url_at_issue_time() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));
        let _ = orchestrator.update(SessionMessage::UploadPressed);

        // The setting changes while the upload is in flight; the outcome
        // still carries the base URL it was issued against.
        let _ = orchestrator.update(SessionMessage::BackendUrlEdited(
            "http://elsewhere:9000".to_string(),
        ));
        let _ = orchestrator.update(completed(1, response("abc.jpg", "KA01AB1234")));

        let report = orchestrator.session.report().unwrap();
        assert_eq!(
            report.uploaded_image.url,
            format!("{}/static/upload/abc.jpg", BASE_URL)
        );
        assert_eq!(
            report.detections[0].crop.url,
            format!("{}/static/roi/plate_abc.jpg", BASE_URL)
        );
    }

    #[test]
    fn test_probe_outcome_updates_status_without_touching_session() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));

        let _ = orchestrator.update(SessionMessage::ProbeCompleted(Err(
            "connection refused".to_string()
        )));

        assert_eq!(
            orchestrator.backend_status,
            BackendStatus::Unreachable("connection refused".to_string())
        );
        assert!(orchestrator.session.selected().is_some());
        assert!(orchestrator.session.error().is_none());
    }

    #[test]
    fn test_artifact_bytes_attach_to_current_report_only() {
        let mut orchestrator = orchestrator();
        let _ = orchestrator.update(picked("plate1.jpg"));
        let _ = orchestrator.update(SessionMessage::UploadPressed);
        let _ = orchestrator.update(completed(1, response("abc.jpg", "KA01AB1234")));

        let _ = orchestrator.update(SessionMessage::ArtifactFetched(
            1,
            ArtifactKind::ProcessedImage,
            Ok(vec![1, 2, 3]),
        ));
        let _ = orchestrator.update(SessionMessage::ArtifactFetched(
            99,
            ArtifactKind::UploadedImage,
            Ok(vec![4, 5, 6]),
        ));

        let report = orchestrator.session.report().unwrap();
        assert!(report.processed_image.image.is_some());
        assert!(report.uploaded_image.image.is_none());
    }

    #[test]
    fn test_classify_upload_error_tells_decode_failures_apart() {
        let decode_error: anyhow::Error =
            serde_json::from_str::<UploadResponse>("{").unwrap_err().into();
        let transport_error = anyhow::anyhow!("connection reset by peer");

        assert!(matches!(
            classify_upload_error(decode_error),
            SessionError::MalformedResponse(_)
        ));
        assert!(matches!(
            classify_upload_error(transport_error),
            SessionError::UploadFailed(_)
        ));
    }
}
