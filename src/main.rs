#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // no console in release
// Entry point kept minimal: logger, settings, localization, window config, run.

use eframe::{egui, egui_wgpu::WgpuConfiguration};

mod api;
mod app;
mod localization;
mod logger;
mod types;
mod ui_constants;
mod views;

fn main() -> eframe::Result<()> {
    logger::init();
    app::settings::load_settings_from_disk();

    let (preferred_lang, log_file) =
        app::settings::with_settings(|s| (s.language, s.log_file.clone()));
    if let Err(e) = logger::open_log_file(&log_file) {
        log::error!("Cannot open log file {}: {e}", log_file.to_string_lossy());
    }
    if let Err(e) = localization::initialize_localization(preferred_lang) {
        log::error!("Localization initialization failed: {e}");
    }
    let title = app::settings::with_settings(|s| s.resolved_window_title());

    // Wgpu without vsync for the lowest input latency
    let wgpu_options = WgpuConfiguration {
        present_mode: eframe::wgpu::PresentMode::AutoNoVsync,
        ..Default::default()
    };
    let native_options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        vsync: false,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        wgpu_options,
        viewport: egui::ViewportBuilder::default()
            .with_title(title.as_str())
            .with_inner_size(ui_constants::WINDOW_SIZE)
            .with_resizable(true),
        ..Default::default()
    };

    let res = eframe::run_native(
        title.as_str(),
        native_options,
        Box::new(|_cc| Box::new(app::PostsApp::new(api::ApiService::new()))),
    );
    if let Err(ref e) = res {
        log::error!("eframe::run_native failed: {e}");
    }
    res
}
