#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod app_theme;
mod core;
mod global_constants;
mod ports;
mod presentation;
mod user_settings;


use app::PlateLensApp;

fn main() -> iced::Result {
    env_logger::init();

    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    iced::application(
        global_constants::APPLICATION_TITLE,
        PlateLensApp::handle_update,
        PlateLensApp::render_view,
    )
    .theme(PlateLensApp::theme)
    .window_size((1024.0, 840.0))
    .run_with(PlateLensApp::build)
}
