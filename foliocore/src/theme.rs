//! folioOS theme: dark glass windows on a blue-violet desktop.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub struct FolioColors;

impl FolioColors {
    pub const DESKTOP: Color32 = Color32::from_rgb(67, 56, 202);
    pub const DESKTOP_ACCENT: Color32 = Color32::from_rgb(124, 58, 237);
    pub const WINDOW: Color32 = Color32::from_rgba_premultiplied(17, 24, 39, 242);
    pub const HEADER: Color32 = Color32::from_rgb(31, 41, 55);
    pub const PANEL: Color32 = Color32::from_rgb(38, 48, 64);
    pub const TASKBAR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 140);
    pub const BORDER: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
    pub const TEXT: Color32 = Color32::from_rgb(243, 244, 246);
    pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175);
    pub const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
    pub const GOOD: Color32 = Color32::from_rgb(74, 222, 128);
    pub const WARN: Color32 = Color32::from_rgb(250, 204, 21);
    pub const BAD: Color32 = Color32::from_rgb(248, 113, 113);
}

pub struct FolioTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    pub rounding: f32,
}

impl Default for FolioTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
            rounding: 8.0,
        }
    }
}

impl FolioTheme {
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::dark();
        visuals.window_fill = FolioColors::WINDOW;
        visuals.panel_fill = FolioColors::DESKTOP;
        visuals.extreme_bg_color = FolioColors::HEADER;
        visuals.window_rounding = Rounding::same(self.rounding);
        visuals.menu_rounding = Rounding::same(self.rounding);
        visuals.window_stroke = Stroke::new(1.0, FolioColors::BORDER);
        visuals.override_text_color = Some(FolioColors::TEXT);
        visuals.selection.bg_fill = FolioColors::ACCENT.gamma_multiply(0.5);
        visuals.hyperlink_color = FolioColors::ACCENT;

        let rounding = Rounding::same(self.rounding / 2.0);
        for ws in [
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
            &mut visuals.widgets.open,
        ] {
            ws.rounding = rounding;
        }
        visuals.widgets.inactive.weak_bg_fill = FolioColors::PANEL;
        visuals.widgets.inactive.bg_fill = FolioColors::PANEL;

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        // Clicks on text fall through to the card or header underneath.
        style.interaction.selectable_labels = false;

        ctx.set_style(style);
    }

    pub fn header_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(FolioColors::HEADER)
            .inner_margin(egui::Margin::symmetric(10.0, 4.0))
    }

    pub fn taskbar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(FolioColors::TASKBAR)
            .stroke(Stroke::new(1.0, FolioColors::BORDER))
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
    }

    /// Rounded card used inside content panels.
    pub fn card_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(FolioColors::PANEL)
            .rounding(Rounding::same(8.0))
            .inner_margin(egui::Margin::same(12.0))
    }
}

/// Strip Cmd+/- so egui does not rescale the whole desktop.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command
                        && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals))
        });
    });
}
