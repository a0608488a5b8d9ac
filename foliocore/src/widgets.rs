//! Shared widgets: window header controls and small text helpers.

use crate::theme::FolioColors;
use egui::{Rect, Response, RichText, Sense, Stroke, Ui};

/// What the user asked for in a window header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    None,
    Minimize,
    ToggleFullscreen,
    Close,
}

const BUTTON_SIZE: f32 = 22.0;

fn control_button(ui: &mut Ui, hover: egui::Color32, draw: impl FnOnce(&egui::Painter, Rect, Stroke)) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE), Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        if response.hovered() {
            painter.rect_filled(rect, 4.0, hover.gamma_multiply(0.3));
        }
        draw(painter, rect.shrink(6.0), Stroke::new(1.5, FolioColors::TEXT));
    }
    response
}

/// Minimize, maximize/restore and close, laid out right to left. Call
/// inside a right-to-left layout.
pub fn window_control_buttons(ui: &mut Ui, fullscreen: bool) -> WindowAction {
    let mut action = WindowAction::None;

    let close = control_button(ui, FolioColors::BAD, |p, r, s| {
        p.line_segment([r.left_top(), r.right_bottom()], s);
        p.line_segment([r.right_top(), r.left_bottom()], s);
    });
    if close.on_hover_text("close").clicked() {
        action = WindowAction::Close;
    }

    let maximize = control_button(ui, FolioColors::GOOD, |p, r, s| {
        if fullscreen {
            let back = r.translate(egui::vec2(2.0, -2.0)).shrink(1.0);
            p.rect_stroke(back, 0.0, s);
            p.rect_filled(r.shrink(1.0), 0.0, FolioColors::HEADER);
            p.rect_stroke(r.shrink(1.0), 0.0, s);
        } else {
            p.rect_stroke(r, 0.0, s);
        }
    });
    let label = if fullscreen { "restore" } else { "maximize" };
    if maximize.on_hover_text(label).clicked() {
        action = WindowAction::ToggleFullscreen;
    }

    let minimize = control_button(ui, FolioColors::WARN, |p, r, s| {
        p.line_segment([egui::pos2(r.left(), r.center().y), egui::pos2(r.right(), r.center().y)], s);
    });
    if minimize.on_hover_text("minimize").clicked() {
        action = WindowAction::Minimize;
    }

    action
}

/// One line of small status text.
pub fn status_bar(ui: &mut Ui, text: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(text).small().color(FolioColors::MUTED));
    });
}

/// Panel title with a leading glyph.
pub fn section_heading(ui: &mut Ui, icon: &str, title: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(22.0));
        ui.label(RichText::new(title).heading().strong());
    });
    ui.add_space(8.0);
}

/// Large centered number above a caption, used for score boards.
pub fn stat(ui: &mut Ui, value: impl ToString, caption: &str, color: egui::Color32) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(value.to_string()).size(24.0).strong().color(color));
        ui.label(RichText::new(caption).small().color(FolioColors::MUTED));
    });
}
