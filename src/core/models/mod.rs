mod recognition;
mod report;
mod selected_image;
mod session_state;
mod upload_tracker;

pub use recognition::{DetectionRecord, UploadResponse};
pub use report::{artifact_url, ArtifactKind, ArtifactSlot, PlateDetection, PlateReport};
pub use selected_image::SelectedImage;
pub use session_state::{SessionError, SessionState};
pub use upload_tracker::UploadTracker;
