use eframe::egui::{self, Color32, RichText, Rounding, Stroke};

use super::meta_row::draw_meta_row;
use crate::types::Post;
use crate::ui_constants::{card, spacing};

/// Fixed-width card showing one post.
/// Strictly constrained to `width` so rows form a proper grid; height follows the body.
pub fn post_card(ui: &mut egui::Ui, post: &Post, width: f32) -> egui::Response {
    let fill = Color32::from_rgb(36, 36, 36);
    let stroke = Stroke::new(1.0, Color32::from_rgb(64, 64, 64));

    ui.set_min_width(width);
    ui.set_max_width(width);

    egui::Frame::none()
        .fill(fill)
        .stroke(stroke)
        .rounding(Rounding::same(card::ROUNDING))
        .inner_margin(egui::Margin::same(card::INNER_MARGIN))
        .show(ui, |ui| {
            ui.set_width(width - 2.0 * card::INNER_MARGIN);

            ui.add(
                egui::Label::new(
                    RichText::new(&post.title)
                        .heading()
                        .color(Color32::from_rgb(230, 230, 230)),
                )
                .wrap(true),
            );
            ui.add_space(spacing::SMALL);
            ui.add(
                egui::Label::new(RichText::new(&post.body).color(Color32::from_rgb(200, 200, 200)))
                    .wrap(true),
            );
            ui.add_space(spacing::MEDIUM);

            egui::Frame::none()
                .fill(Color32::from_rgba_premultiplied(28, 28, 28, 180))
                .rounding(Rounding::same(card::META_ROUNDING))
                .inner_margin(egui::Margin::symmetric(card::META_MARGIN_H, card::META_MARGIN_V))
                .show(ui, |ui| draw_meta_row(ui, post));
        })
        .response
}
