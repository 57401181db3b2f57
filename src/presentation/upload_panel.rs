use iced::widget::{button, checkbox, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::app_theme;
use crate::core::models::SessionState;
use crate::core::orchestrators::{BackendStatus, SessionMessage};
use crate::global_constants;
use crate::user_settings::{ThemeMode, UserSettings};

/// Top section of the window: backend status, the file picker row, the
/// upload trigger and the settings controls.
pub fn upload_panel<'a>(
    session: &'a SessionState,
    backend_status: &'a BackendStatus,
    settings: &'a UserSettings,
    uploads_in_flight: usize,
) -> Element<'a, SessionMessage> {
    let title = text(global_constants::APPLICATION_TITLE).size(28);

    let status_line = match backend_status {
        BackendStatus::Probing => text("Checking backend reachability...".to_string()).size(14),
        BackendStatus::Reachable => text("Backend reachable".to_string()).size(14),
        BackendStatus::Unreachable(reason) => {
            // Advisory only; uploading stays available.
            text(format!("Backend unreachable: {}", reason)).size(14)
        }
    };

    let selected_label = session
        .selected()
        .map(|image| image.file_name.as_str())
        .unwrap_or("No image selected");

    let pick_button = button(text("Choose Image"))
        .padding([10, 20])
        .on_press(SessionMessage::PickImage);

    let upload_button = button(text("Upload"))
        .padding([10, 20])
        .style(app_theme::primary_button_style)
        .on_press(SessionMessage::UploadPressed);

    let mut picker_row = row![pick_button, text(selected_label), upload_button]
        .spacing(16)
        .align_y(Alignment::Center);

    if uploads_in_flight > 0 {
        picker_row = picker_row.push(text(format!("Uploading ({} in flight)...", uploads_in_flight)).size(14));
    }

    let backend_url_input = text_input(
        global_constants::DEFAULT_BACKEND_BASE_URL,
        &settings.backend_base_url,
    )
    .on_input(SessionMessage::BackendUrlEdited)
    .width(Length::Fixed(320.0));

    let clear_on_select = checkbox(
        "Clear results when picking a new image",
        settings.clear_results_on_new_selection,
    )
    .on_toggle(SessionMessage::ClearOnSelectToggled);

    let theme_picker = pick_list(
        ThemeMode::ALL,
        Some(settings.theme_mode),
        SessionMessage::ThemeModeSelected,
    );

    let save_button = button(text("Save Settings"))
        .padding([6, 14])
        .on_press(SessionMessage::SaveSettings);

    let settings_row = row![
        text("Backend:").size(14),
        backend_url_input,
        theme_picker,
        save_button
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let content = column![title, status_line, picker_row, settings_row, clear_on_select]
        .spacing(16)
        .width(Length::Fill);

    container(content)
        .style(app_theme::card_style)
        .padding(20)
        .width(Length::Fill)
        .into()
}
