//! Taskbar: start button, one button per open window, clock.

use crate::catalog::Content;
use chrono::{Local, NaiveDateTime};
use egui::{Color32, Rect, RichText, Sense, Stroke, Ui, Vec2};
use foliocore::layout::TASKBAR_HEIGHT;
use foliocore::theme::{FolioColors, FolioTheme};
use foliocore::widgets::status_bar;
use foliocore::{Ticker, WindowId, WindowManager};
use std::time::{Duration, Instant};

const CLOCK_INTERVAL: Duration = Duration::from_secs(1);
const START_BUTTON: Vec2 = Vec2::new(44.0, 34.0);
const ENTRY_HEIGHT: f32 = 34.0;

/// Snapshot of one open window for the taskbar.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub minimized: bool,
    /// Topmost visible window.
    pub active: bool,
}

/// One entry per open record, in creation order, minimized ones included.
pub fn entries(manager: &WindowManager<Content>) -> Vec<TaskbarEntry> {
    let active = manager.topmost_visible().map(|r| r.id.clone());
    manager
        .open_records()
        .map(|r| TaskbarEntry {
            id: r.id.clone(),
            title: r.title.clone(),
            icon: r.icon.clone(),
            minimized: r.is_minimized,
            active: active.as_ref() == Some(&r.id),
        })
        .collect()
}

/// Minimized entries come back; visible ones are raised.
pub fn click(manager: &mut WindowManager<Content>, entry: &TaskbarEntry) {
    if entry.minimized {
        manager.restore(&entry.id);
    } else {
        manager.focus(&entry.id);
    }
}

/// Time and date lines for the clock.
pub fn clock_text(now: NaiveDateTime, use_24h: bool) -> (String, String) {
    let time = if use_24h {
        now.format("%H:%M").to_string()
    } else {
        now.format("%I:%M %p").to_string()
    };
    (time, now.format("%b %-d").to_string())
}

/// Taskbar clock, refreshed once a second while the desktop is shown.
#[derive(Debug)]
pub struct Clock {
    ticker: Ticker,
    use_24h: bool,
    time: String,
    date: String,
}

impl Clock {
    pub fn new(use_24h: bool) -> Self {
        let mut clock = Self {
            ticker: Ticker::new(CLOCK_INTERVAL),
            use_24h,
            time: String::new(),
            date: String::new(),
        };
        clock.set(Local::now().naive_local());
        clock
    }

    pub fn set(&mut self, now: NaiveDateTime) {
        (self.time, self.date) = clock_text(now, self.use_24h);
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn start(&mut self, now: Instant) {
        if !self.is_running() {
            self.set(Local::now().naive_local());
            self.ticker.start(now);
        }
    }

    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    /// Refresh the text if a second went by. Returns the wait until the
    /// next refresh.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        if self.ticker.poll(now) > 0 {
            self.set(Local::now().naive_local());
        }
        self.ticker.next_deadline(now)
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// What happened on the taskbar this frame.
#[derive(Debug, Default)]
pub struct TaskbarOutput {
    pub start_clicked: bool,
    pub start_rect: Option<Rect>,
    pub clicked: Option<TaskbarEntry>,
}

fn start_button(ui: &mut Ui, open: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(START_BUTTON, Sense::click());
    let painter = ui.painter();
    if open {
        painter.rect_filled(rect, 6.0, Color32::from_white_alpha(50));
    } else if response.hovered() {
        painter.rect_filled(rect, 6.0, Color32::from_white_alpha(25));
    }
    // Four-pane logo.
    let pane = 8.0;
    let gap = 2.0;
    let origin = rect.center() - Vec2::splat(pane + gap / 2.0);
    for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
        let min = origin + Vec2::new(dx * (pane + gap), dy * (pane + gap));
        painter.rect_filled(Rect::from_min_size(min, Vec2::splat(pane)), 1.5, FolioColors::ACCENT);
    }
    response.on_hover_text("Start")
}

fn entry_button(ui: &mut Ui, entry: &TaskbarEntry) -> egui::Response {
    let fill = if entry.active {
        Color32::from_white_alpha(45)
    } else {
        Color32::from_white_alpha(12)
    };
    let text = RichText::new(format!("{} {}", entry.icon, entry.title));
    let text = if entry.minimized { text.color(FolioColors::MUTED) } else { text };
    let response = ui.add(
        egui::Button::new(text)
            .fill(fill)
            .stroke(Stroke::NONE)
            .min_size(Vec2::new(0.0, ENTRY_HEIGHT)),
    );
    if entry.active {
        let r = response.rect;
        let bar = Rect::from_center_size(egui::pos2(r.center().x, r.bottom() - 1.5), Vec2::new(r.width() * 0.4, 3.0));
        ui.painter().rect_filled(bar, 1.5, FolioColors::ACCENT);
    }
    response.on_hover_text(entry.title.as_str())
}

/// Bottom panel. Reserves [`TASKBAR_HEIGHT`] below the desktop. `status`
/// is shown left of the clock while it is fresh.
pub fn show(
    ctx: &egui::Context,
    entries: &[TaskbarEntry],
    clock: &Clock,
    start_open: bool,
    status: Option<&str>,
) -> TaskbarOutput {
    let mut out = TaskbarOutput::default();
    egui::TopBottomPanel::bottom("taskbar")
        .exact_height(TASKBAR_HEIGHT)
        .frame(FolioTheme::taskbar_frame())
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let start = start_button(ui, start_open);
                out.start_rect = Some(start.rect);
                out.start_clicked = start.clicked();

                ui.add_space(8.0);
                for entry in entries {
                    if entry_button(ui, entry).clicked() {
                        out.clicked = Some(entry.clone());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(clock.time()).strong());
                        ui.label(RichText::new(clock.date()).small().color(FolioColors::MUTED));
                    });
                    if let Some(status) = status {
                        ui.add_space(12.0);
                        status_bar(ui, status);
                    }
                });
            });
        });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find, Launcher};
    use chrono::NaiveDate;

    fn manager_with(ids: &[&str]) -> WindowManager<Content> {
        let mut manager = WindowManager::new();
        for id in ids {
            manager.open(find(id).unwrap().descriptor(Launcher::Desktop));
        }
        manager
    }

    #[test]
    fn test_entries_follow_open_records() {
        let mut manager = manager_with(&["about", "skills", "snake"]);
        manager.minimize(&WindowId::new("skills"));
        manager.close(&WindowId::new("about"));

        let list = entries(&manager);
        let ids: Vec<_> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["skills", "snake"]);
        assert!(list[0].minimized && !list[0].active);
        assert!(!list[1].minimized && list[1].active);
    }

    #[test]
    fn test_only_topmost_is_active() {
        let mut manager = manager_with(&["about", "skills"]);
        manager.focus(&WindowId::new("about"));
        let list = entries(&manager);
        assert_eq!(list.iter().filter(|e| e.active).count(), 1);
        assert!(list.iter().find(|e| e.id.as_str() == "about").unwrap().active);
    }

    #[test]
    fn test_nothing_active_when_all_minimized() {
        let mut manager = manager_with(&["about"]);
        manager.minimize(&WindowId::new("about"));
        assert!(entries(&manager).iter().all(|e| !e.active));
    }

    #[test]
    fn test_click_restores_or_focuses() {
        let mut manager = manager_with(&["about", "skills"]);
        manager.minimize(&WindowId::new("about"));

        let about = entries(&manager).into_iter().find(|e| e.id.as_str() == "about").unwrap();
        click(&mut manager, &about);
        let record = manager.get(&WindowId::new("about")).unwrap();
        assert!(record.is_visible());
        assert_eq!(manager.topmost_visible().unwrap().id.as_str(), "about");

        let skills = entries(&manager).into_iter().find(|e| e.id.as_str() == "skills").unwrap();
        click(&mut manager, &skills);
        assert_eq!(manager.topmost_visible().unwrap().id.as_str(), "skills");
    }

    #[test]
    fn test_clock_formats() {
        let t = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap().and_hms_opt(21, 5, 0).unwrap();
        assert_eq!(clock_text(t, true), ("21:05".to_string(), "Mar 7".to_string()));
        assert_eq!(clock_text(t, false).0, "09:05 PM");
    }

    #[test]
    fn test_clock_ticker_lifecycle() {
        let mut clock = Clock::new(true);
        assert!(!clock.is_running());
        let t0 = Instant::now();
        clock.start(t0);
        assert_eq!(clock.poll(t0), Some(CLOCK_INTERVAL));
        clock.stop();
        assert_eq!(clock.poll(t0 + CLOCK_INTERVAL), None);
        assert!(!clock.time().is_empty());
    }
}
