use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::app_theme;
use crate::core::models::{ArtifactSlot, SessionState};
use crate::core::orchestrators::SessionMessage;

/// Pure projection of the session state into the result panels. Each
/// panel is gated on its own piece of state:
///
/// - images: present iff a report exists,
/// - crops: present iff the report has detections,
/// - text: present iff the first detection carries non-empty text,
/// - error: present iff the last operation recorded one.
pub fn results_view(session: &SessionState) -> Element<'_, SessionMessage> {
    let mut panels = Column::new().spacing(24).width(Length::Fill);

    if let Some(error) = session.error() {
        panels = panels.push(error_panel(error.to_string()));
    }

    if let Some(report) = session.report() {
        panels = panels.push(images_panel(
            &report.uploaded_image,
            &report.processed_image,
        ));

        if !report.detections.is_empty() {
            let crops: Vec<&ArtifactSlot> =
                report.detections.iter().map(|d| &d.crop).collect();
            panels = panels.push(crops_panel(&crops));
        }
    }

    if let Some(plate_text) = session.displayed_text() {
        panels = panels.push(text_panel(plate_text));
    }

    panels.into()
}

fn error_panel<'a>(message: String) -> Element<'a, SessionMessage> {
    let dismiss = button(text("Dismiss"))
        .padding([6, 14])
        .style(app_theme::dismiss_button_style)
        .on_press(SessionMessage::DismissError);

    let content = row![text(message).size(16).width(Length::Fill), dismiss]
        .spacing(16)
        .align_y(Alignment::Center);

    container(content)
        .style(app_theme::error_panel_style)
        .padding(16)
        .width(Length::Fill)
        .into()
}

fn images_panel<'a>(
    uploaded: &'a ArtifactSlot,
    processed: &'a ArtifactSlot,
) -> Element<'a, SessionMessage> {
    let heading = text("Uploaded & Processed Images").size(20);

    let images = row![
        artifact_cell(uploaded, "Uploaded"),
        artifact_cell(processed, "Processed"),
    ]
    .spacing(16)
    .width(Length::Fill);

    column![heading, images].spacing(12).into()
}

fn crops_panel<'a>(crops: &[&'a ArtifactSlot]) -> Element<'a, SessionMessage> {
    let heading = text("Cropped License Plates").size(20);

    let mut cells = iced::widget::Row::new().spacing(16);
    for (index, crop) in crops.iter().enumerate() {
        cells = cells.push(artifact_cell(crop, &format!("Plate {}", index + 1)));
    }

    column![heading, cells].spacing(12).into()
}

fn text_panel(plate_text: &str) -> Element<'_, SessionMessage> {
    let heading = text("Extracted License Plate Text").size(20);

    let value = container(text(plate_text.to_string()).size(22))
        .style(app_theme::plate_text_style)
        .padding(16)
        .width(Length::Fill);

    column![heading, value].spacing(12).into()
}

fn artifact_cell<'a>(slot: &'a ArtifactSlot, label: &str) -> Element<'a, SessionMessage> {
    let body: Element<'a, SessionMessage> = match &slot.image {
        Some(handle) => image(handle.clone()).width(Length::Fill).into(),
        // Bytes are still in flight; show where they will come from.
        None => text(format!("Loading {}", slot.url)).size(14).into(),
    };

    let caption = text(format!("{}: {}", label, slot.reference)).size(14);

    container(column![body, caption].spacing(8))
        .style(app_theme::card_style)
        .padding(12)
        .width(Length::Fill)
        .into()
}
