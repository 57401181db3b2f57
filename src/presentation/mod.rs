mod results_view;
mod upload_panel;

use iced::widget::{column, container, scrollable};
use iced::{Element, Length};

use crate::core::models::SessionState;
use crate::core::orchestrators::{BackendStatus, SessionMessage};
use crate::user_settings::UserSettings;

pub use results_view::results_view;
pub use upload_panel::upload_panel;

pub fn main_view<'a>(
    session: &'a SessionState,
    backend_status: &'a BackendStatus,
    settings: &'a UserSettings,
    uploads_in_flight: usize,
) -> Element<'a, SessionMessage> {
    let content = column![
        upload_panel(session, backend_status, settings, uploads_in_flight),
        results_view(session),
    ]
    .spacing(24)
    .padding(24)
    .width(Length::Fill);

    container(scrollable(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
