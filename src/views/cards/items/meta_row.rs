use eframe::egui::{self, Color32, RichText};

use crate::localization::translate_with;
use crate::types::Post;

/// Single-line footer: post id and owning user.
pub fn draw_meta_row(ui: &mut egui::Ui, post: &Post) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;
        let text = translate_with(
            "post-meta",
            &[("id", post.id.to_string()), ("user", post.user_id.to_string())],
        );
        ui.label(RichText::new(text).small().color(Color32::from_rgb(170, 170, 170)));
    });
}
