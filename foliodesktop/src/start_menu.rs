//! Start menu: pinned résumé sections and every app by category.

use crate::catalog::{self, CatalogEntry, Category};
use crate::content::{identity, RESUME};
use egui::{Pos2, Rect, RichText, Ui, Vec2};
use foliocore::layout::TASKBAR_HEIGHT;
use foliocore::theme::FolioColors;

const WIDTH: f32 = 340.0;
const PINNED_COLUMNS: usize = 3;

#[derive(Debug, Default)]
pub struct StartMenu {
    open: bool,
}

/// What the user did in the menu this frame.
#[derive(Debug, Default)]
pub struct StartMenuOutput {
    pub launch: Option<&'static CatalogEntry>,
    pub close: bool,
    pub rect: Option<Rect>,
}

impl StartMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Draw above the taskbar, anchored bottom-left of `screen`.
    pub fn show(&self, ctx: &egui::Context, screen: Rect) -> StartMenuOutput {
        let mut out = StartMenuOutput::default();
        if !self.open {
            return out;
        }
        let max_height = (screen.height() - TASKBAR_HEIGHT) * 0.8;
        let anchor = Pos2::new(screen.left() + 8.0, screen.bottom() - TASKBAR_HEIGHT - 4.0);

        let area = egui::Area::new(egui::Id::new("folio_start_menu"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::LEFT_BOTTOM)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(FolioColors::WINDOW)
                    .rounding(egui::Rounding::same(12.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.set_width(WIDTH);
                        identity(ui, &RESUME.about, 44.0);
                        ui.separator();
                        egui::ScrollArea::vertical().max_height(max_height - 140.0).show(ui, |ui| {
                            if let Some(entry) = pinned_grid(ui) {
                                out.launch = Some(entry);
                            }
                            ui.add_space(8.0);
                            if let Some(entry) = all_apps(ui) {
                                out.launch = Some(entry);
                            }
                        });
                        ui.separator();
                        let close = egui::Button::new(RichText::new("⏻ Close").color(FolioColors::TEXT)).frame(false);
                        if ui.add(close).clicked() {
                            out.close = true;
                        }
                    });
            });
        out.rect = Some(area.response.rect);
        out
    }
}

fn caption(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).small().strong().color(FolioColors::MUTED));
}

fn pinned_grid(ui: &mut Ui) -> Option<&'static CatalogEntry> {
    caption(ui, "PINNED");
    let mut clicked = None;
    let pinned: Vec<_> = catalog::pinned().collect();
    for row in pinned.chunks(PINNED_COLUMNS) {
        ui.columns(PINNED_COLUMNS, |cols| {
            for (col, entry) in cols.iter_mut().zip(row) {
                let text = RichText::new(format!("{}\n{}", entry.icon, entry.title)).size(12.0);
                let button = egui::Button::new(text).frame(false).min_size(Vec2::new(col.available_width(), 52.0));
                if col.add(button).clicked() {
                    clicked = Some(*entry);
                }
            }
        });
    }
    clicked
}

fn all_apps(ui: &mut Ui) -> Option<&'static CatalogEntry> {
    caption(ui, "ALL APPS");
    let mut clicked = None;
    for category in [Category::Resume, Category::Games] {
        ui.label(RichText::new(category.label()).small().color(FolioColors::MUTED));
        for entry in catalog::in_category(category) {
            let button = egui::Button::new(format!("{}  {}", entry.icon, entry.title))
                .frame(false)
                .min_size(Vec2::new(ui.available_width(), 28.0));
            if ui.add(button).clicked() {
                clicked = Some(entry);
            }
        }
        ui.add_space(4.0);
    }
    clicked
}

/// A press outside the menu and its toggle button closes the menu.
pub fn dismissed_by(press: Option<Pos2>, menu: Option<Rect>, button: Option<Rect>) -> bool {
    let Some(pos) = press else {
        return false;
    };
    let inside = |r: Option<Rect>| r.is_some_and(|r| r.contains(pos));
    !inside(menu) && !inside(button)
}
