use std::sync::Arc;

use iced::{Element, Task, Theme};

use crate::adapters::HttpRecognitionBackend;
use crate::app_theme;
use crate::core::orchestrators::{SessionMessage, SessionOrchestrator};
use crate::ports::NativeImagePicker;
use crate::user_settings::UserSettings;

pub struct PlateLensApp {
    orchestrator: SessionOrchestrator,
}

impl PlateLensApp {
    pub fn build() -> (Self, Task<SessionMessage>) {
        log::info!("[APP] Initializing application");

        let settings = UserSettings::load().unwrap_or_else(|e| {
            log::warn!("[APP] Failed to load settings: {}, using defaults", e);
            UserSettings::default()
        });

        let orchestrator = SessionOrchestrator::build(
            Arc::new(HttpRecognitionBackend::new()),
            Arc::new(NativeImagePicker::new()),
            settings,
        );

        let startup = orchestrator.start();

        (Self { orchestrator }, startup)
    }

    pub fn handle_update(&mut self, message: SessionMessage) -> Task<SessionMessage> {
        self.orchestrator.update(message)
    }

    pub fn render_view(&self) -> Element<'_, SessionMessage> {
        self.orchestrator.view()
    }

    pub fn theme(&self) -> Theme {
        app_theme::get_theme(self.orchestrator.theme_mode())
    }
}
