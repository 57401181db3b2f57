pub mod session_orchestrator;

pub use session_orchestrator::{BackendStatus, SessionMessage, SessionOrchestrator};
