// Root shell: top bar with the title and window toggles, central panel as the
// outlet where the post list view is drawn. No logic beyond composition.

use eframe::{egui, App};

use crate::api::ApiService;
use crate::localization::{self, translate, SupportedLang};

mod about_ui;
mod logs_ui;
mod posts;
mod runtime;
pub mod settings;

use posts::PostsView;
pub use runtime::rt;

pub struct PostsApp {
    title: String,
    posts: PostsView,
}

impl PostsApp {
    /// Build the shell; the api handle is passed down to the list view.
    pub fn new(api: ApiService) -> Self {
        let (title, endpoint) =
            settings::with_settings(|s| (s.resolved_window_title(), s.endpoint.clone()));
        Self {
            title,
            posts: PostsView::new(api, endpoint),
        }
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("shell_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(translate("menu-about")).clicked() {
                        about_ui::open_about();
                    }
                    if ui.button(translate("menu-logs")).clicked() {
                        logs_ui::open_logs();
                    }
                    language_picker(ui);
                });
            });
        });
    }
}

fn language_picker(ui: &mut egui::Ui) {
    let current = localization::current_language();
    let mut selected = current;
    egui::ComboBox::from_id_source("language_picker")
        .selected_text(current.native_name())
        .show_ui(ui, |ui| {
            for lang in SupportedLang::ALL {
                ui.selectable_value(&mut selected, lang, lang.native_name());
            }
        });
    ui.label(translate("menu-language"));

    if selected != current {
        if let Err(e) = localization::set_current_language(selected) {
            log::error!("Cannot switch language to {}: {e}", selected.code());
            return;
        }
        settings::with_settings_mut(|s| s.language = Some(selected));
        settings::save_settings_to_disk();
        log::info!("Language switched to {}", selected.code());
    }
}

impl App for PostsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep the Logs window live while it is open
        if crate::logger::take_new_flag() && logs_ui::is_open() {
            ctx.request_repaint();
        }

        self.draw_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.posts.ui(ui);
        });

        logs_ui::draw_logs_viewport(ctx);
        about_ui::draw_about_viewport(ctx);
    }
}
