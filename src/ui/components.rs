//! Reusable UI components
//!
//! Standalone form widgets used by the sign-in and settings modals.

use crate::theme;
use eframe::egui;

/// Small section label above a form field
pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_SECTION)
                .color(theme::ACCENT),
        )
        .selectable(false),
    );
    ui.add_space(2.0);
}

/// Single-line text input framed like the rest of the form.
/// `password` masks the typed characters.
pub fn form_text_field(
    ui: &mut egui::Ui,
    value: &mut String,
    hint: &str,
    password: bool,
) -> egui::Response {
    egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
        .corner_radius(theme::RADIUS_DEFAULT)
        .inner_margin(egui::Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(hint)
                    .password(password)
                    .frame(false)
                    .desired_width(ui.available_width())
                    .font(egui::FontId::proportional(theme::FONT_LABEL)),
            )
        })
        .inner
}

/// Custom-painted button with hover/press effects
pub fn painted_button(
    ui: &mut egui::Ui,
    label: &str,
    base_fill: egui::Color32,
    size: egui::Vec2,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let (fill, draw_rect) = theme::button_visual(&response, base_fill, rect);
    ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_SECTION),
        egui::Color32::WHITE,
    );
    response
}

/// Non-interactive button used while a request is in flight
pub fn disabled_button(ui: &mut egui::Ui, label: &str, size: egui::Vec2) {
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, theme::RADIUS_DEFAULT, theme::BTN_DISABLED);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(theme::FONT_SECTION),
        theme::BTN_DISABLED_TEXT,
    );
}

/// Modal close (X) control. Returns true if clicked.
pub fn close_button(ui: &mut egui::Ui) -> bool {
    let close_size = 24.0;
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(close_size, close_size), egui::Sense::click());
    let close_color = if response.hovered() {
        ui.painter().rect_filled(rect, 4.0, theme::BG_SURFACE);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        theme::STATUS_ERROR
    } else {
        theme::TEXT_DIM
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::X,
        egui::FontId::proportional(16.0),
        close_color,
    );
    response.clicked()
}
