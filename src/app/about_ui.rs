// About viewport: version and the endpoint posts are read from.

use eframe::egui;
use lazy_static::lazy_static;
use std::sync::RwLock;

use crate::localization::{translate, translate_with};

lazy_static! {
    static ref ABOUT_OPEN: RwLock<bool> = RwLock::new(false);
}

pub fn open_about() {
    if let Ok(mut v) = ABOUT_OPEN.write() {
        *v = true;
    }
}

pub fn draw_about_viewport(ctx: &egui::Context) {
    let is_open = ABOUT_OPEN.read().map(|g| *g).unwrap_or(false);
    if !is_open {
        return;
    }

    let (title, endpoint) =
        super::settings::with_settings(|s| (s.resolved_window_title(), s.endpoint.clone()));

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("about_window"),
        egui::ViewportBuilder::default()
            .with_title(translate("about-title"))
            .with_inner_size([420.0, 180.0])
            .with_resizable(false),
        move |ctx, _class| {
            if ctx.input(|i| i.viewport().close_requested()) {
                if let Ok(mut v) = ABOUT_OPEN.write() {
                    *v = false;
                }
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                ctx.request_repaint();
                return;
            }

            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(title.as_str());
                ui.add_space(4.0);
                ui.label(translate_with(
                    "about-version",
                    &[("version", env!("CARGO_PKG_VERSION").to_string())],
                ));
                ui.add_space(8.0);
                ui.label(translate("about-endpoint"));
                ui.hyperlink(endpoint.as_str());
            });
        },
    );
}
