//! folioOS desktop shell
//!
//! - Gradient background with a grid of launch icons (double-click opens)
//! - Managed windows drawn back to front, dragged by their header
//! - Taskbar with start button, open-window buttons and a clock
//! - Start menu listing every launchable item
//! - Single-column résumé on narrow screens
//!
//! All window state lives in the [`WindowManager`]. This module only turns
//! input into manager calls and draws what the registry says.

use crate::catalog::{self, CatalogEntry, Content, Launcher, CATALOG};
use crate::content::{self, PanelAction, RESUME};
use crate::narrow::NarrowCv;
use crate::start_menu::{self, StartMenu};
use crate::taskbar::{self, Clock};
use egui::{Align2, Context, FontId, Id, LayerId, Order, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use foliocore::layout::Viewport;
use foliocore::repaint::RepaintController;
use foliocore::theme::{consume_zoom_keys, FolioColors};
use foliocore::view::ViewSet;
use foliocore::widgets::{window_control_buttons, WindowAction};
use foliocore::{Position, Settings, Size, WindowEvent, WindowId, WindowManager};
use foliosnake::SnakeApp;
use foliotictactoe::TicTacToeApp;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Desktop icon layout
const ICON_CELL: Vec2 = Vec2::new(88.0, 100.0);
const ICON_TILE: f32 = 56.0;

/// Double-click timing threshold in milliseconds
const DOUBLE_CLICK_MS: u128 = 400;

const HEADER_HEIGHT: f32 = 36.0;
const WINDOW_ROUNDING: f32 = 8.0;
const BODY_MARGIN: f32 = 14.0;

/// How long a status message stays on the taskbar.
const STATUS_SECS: u64 = 5;

/// Status-line text for a window event. Focus and geometry changes are
/// too frequent to be worth announcing.
pub fn describe(event: &WindowEvent, title: &str) -> Option<String> {
    match event {
        WindowEvent::Opened(_) => Some(format!("{title} opened")),
        WindowEvent::Closed(_) => Some(format!("{title} closed")),
        WindowEvent::Minimized(_) => Some(format!("{title} minimized")),
        WindowEvent::Restored(_) => Some(format!("{title} restored")),
        WindowEvent::Focused(_) | WindowEvent::Moved(..) | WindowEvent::Resized(..) => None,
    }
}

fn to_position(p: Pos2) -> Position {
    Position::new(p.x, p.y)
}

fn window_layer(id: &WindowId) -> LayerId {
    LayerId::new(Order::Middle, Id::new(("folio_window", id.as_str())))
}

/// Game panels hosted in windows. Created on first show and kept for the
/// session, so closing a game window and reopening it resumes the game.
#[derive(Default)]
struct HostedApps {
    tictactoe: Option<TicTacToeApp>,
    snake: Option<SnakeApp>,
}

impl HostedApps {
    /// Draw `content`. Returns the panel's wake delay and any action it asked for.
    fn show(
        &mut self,
        ui: &mut Ui,
        content: Content,
        settings: &Settings,
        keyboard: bool,
    ) -> (Option<Duration>, Option<PanelAction>) {
        match content {
            Content::TicTacToe => {
                let app = self.tictactoe.get_or_insert_with(|| {
                    tracing::debug!(event = "desktop.panel.created", panel = "tictactoe");
                    TicTacToeApp::new(settings)
                });
                (app.show(ui), None)
            }
            Content::Snake => {
                let app = self.snake.get_or_insert_with(|| {
                    tracing::debug!(event = "desktop.panel.created", panel = "snake");
                    SnakeApp::new(settings)
                });
                (app.show(ui, keyboard), None)
            }
            section => (None, content::show_section(ui, section, &RESUME)),
        }
    }

    fn on_hidden(&mut self, content: Content) {
        if content == Content::Snake {
            if let Some(snake) = self.snake.as_mut() {
                snake.on_hidden();
            }
        }
    }
}

/// What one window asked for while being drawn.
struct WindowOutput {
    id: WindowId,
    stored: Size,
    origin: Position,
    header: egui::Response,
    rect: Rect,
    layer: LayerId,
    action: WindowAction,
    panel: Option<PanelAction>,
}

pub struct DesktopApp {
    manager: WindowManager<Content>,
    views: ViewSet,
    events: Receiver<WindowEvent>,
    settings: Settings,
    hosted: HostedApps,
    start_menu: StartMenu,
    start_button: Option<Rect>,
    clock: Clock,
    narrow: NarrowCv,
    /// Currently selected icon index
    selected_icon: Option<usize>,
    /// Time of last icon click (for double-click detection)
    last_click_time: Instant,
    last_click_index: Option<usize>,
    status_message: String,
    status_time: Option<Instant>,
    repaint: RepaintController,
}

impl DesktopApp {
    pub fn new(settings: Settings) -> Self {
        let mut manager = WindowManager::new();
        let events = manager.subscribe();
        Self {
            manager,
            views: ViewSet::new(),
            events,
            clock: Clock::new(settings.use_24h_time),
            settings,
            hosted: HostedApps::default(),
            start_menu: StartMenu::default(),
            start_button: None,
            narrow: NarrowCv::new(),
            selected_icon: None,
            last_click_time: Instant::now(),
            last_click_index: None,
            status_message: String::new(),
            status_time: None,
            repaint: RepaintController::new(),
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_time = Some(Instant::now());
    }

    /// Status text while it is fresh, plus how long until it fades.
    fn fresh_status(&self, now: Instant) -> Option<(&str, Duration)> {
        let shown = self.status_time?;
        let remaining = Duration::from_secs(STATUS_SECS).checked_sub(now.duration_since(shown))?;
        Some((self.status_message.as_str(), remaining))
    }

    pub fn launch(&mut self, entry: &CatalogEntry, launcher: Launcher) {
        tracing::info!(event = "desktop.window.launch", window = entry.id, launcher = ?launcher);
        self.manager.open(entry.descriptor(launcher));
    }

    /// Apply queued window events: status line, logging, and pausing games
    /// whose window lost its surface.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let id = event.id().clone();
            tracing::debug!(event = "desktop.window.changed", window = %id, change = ?event);
            if matches!(event, WindowEvent::Closed(_) | WindowEvent::Minimized(_)) {
                if let Some(entry) = catalog::find(id.as_str()) {
                    self.hosted.on_hidden(entry.content);
                }
            }
            let title = self.manager.get(&id).map(|r| r.title.clone()).unwrap_or_else(|| id.to_string());
            if let Some(message) = describe(&event, &title) {
                self.set_status(message);
                self.repaint.mark_needs_repaint();
            }
        }
    }

    fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Open(target) => {
                if let Some(entry) = catalog::find_content(target) {
                    self.launch(entry, Launcher::Desktop);
                }
            }
            PanelAction::DownloadResume => self.download_resume(),
        }
    }

    fn download_resume(&mut self) {
        let source = self
            .settings
            .resume_document
            .clone()
            .unwrap_or_else(|| content::default_document(&self.settings.data_dir()));
        let dest = dirs::download_dir().or_else(dirs::home_dir);
        match content::download_resume(&source, dest.as_deref()) {
            Ok(path) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => {
                tracing::warn!(event = "desktop.resume.download_failed", source = %source.display(), error = %e);
                self.set_status(e.to_string());
            }
        }
    }

    // ---------------------------------------------------------------
    // Desktop surface
    // ---------------------------------------------------------------

    fn draw_background(&self, ui: &mut Ui) {
        let rect = ui.max_rect();
        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(rect.left_top(), FolioColors::DESKTOP);
        mesh.colored_vertex(rect.right_top(), FolioColors::DESKTOP_ACCENT);
        mesh.colored_vertex(rect.left_bottom(), FolioColors::DESKTOP_ACCENT);
        mesh.colored_vertex(rect.right_bottom(), FolioColors::DESKTOP);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(1, 3, 2);
        ui.painter().add(egui::Shape::mesh(mesh));
    }

    /// Draw a single desktop icon
    fn draw_icon(&self, ui: &mut Ui, pos: Pos2, entry: &CatalogEntry, index: usize) -> egui::Response {
        let rect = Rect::from_min_size(pos, ICON_CELL);
        let response = ui.allocate_rect(rect, Sense::click());
        let painter = ui.painter();
        let selected = self.selected_icon == Some(index);

        if selected {
            painter.rect_filled(rect, 6.0, egui::Color32::from_white_alpha(40));
        } else if response.hovered() {
            painter.rect_filled(rect, 6.0, egui::Color32::from_white_alpha(20));
        }

        let tile = Rect::from_center_size(
            Pos2::new(rect.center().x, rect.top() + 8.0 + ICON_TILE / 2.0),
            Vec2::splat(ICON_TILE),
        );
        painter.rect_filled(tile, 12.0, egui::Color32::from_white_alpha(30));
        painter.text(tile.center(), Align2::CENTER_CENTER, entry.icon, FontId::proportional(30.0), FolioColors::TEXT);
        painter.text(
            Pos2::new(rect.center().x, tile.bottom() + 14.0),
            Align2::CENTER_CENTER,
            entry.title,
            FontId::proportional(12.0),
            FolioColors::TEXT,
        );

        response.on_hover_text(entry.title)
    }

    fn draw_icons(&mut self, ui: &mut Ui) {
        let origin = ui.max_rect().min;
        let background = ui.interact(ui.max_rect(), Id::new("folio_desktop_bg"), Sense::click());

        let mut clicked = None;
        for (index, entry) in CATALOG.iter().enumerate() {
            let pos = origin + Vec2::new(entry.desktop_position.x, entry.desktop_position.y);
            if self.draw_icon(ui, pos, entry, index).clicked() {
                clicked = Some(index);
            }
        }

        if let Some(index) = clicked {
            let now = Instant::now();
            let is_double_click = self.last_click_index == Some(index)
                && now.duration_since(self.last_click_time).as_millis() < DOUBLE_CLICK_MS;
            if is_double_click {
                self.selected_icon = None;
                self.last_click_index = None;
                self.launch(&CATALOG[index], Launcher::Desktop);
            } else {
                self.selected_icon = Some(index);
                self.last_click_index = Some(index);
                self.last_click_time = now;
            }
        } else if background.clicked() {
            self.selected_icon = None;
        }
    }

    // ---------------------------------------------------------------
    // Windows
    // ---------------------------------------------------------------

    /// Continue or finish the drag in progress, if any.
    fn update_drag(&mut self, ctx: &Context, viewport: Viewport) {
        let (latest, down) = ctx.input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
        let Some(view) = self.views.dragging_mut() else {
            return;
        };
        if !down {
            view.pointer_up(&mut self.manager);
            return;
        }
        let stored = self.manager.get(view.id()).map(|r| r.size);
        if let (Some(pointer), Some(stored)) = (latest, stored) {
            view.pointer_move(to_position(pointer), stored, viewport);
        }
    }

    fn draw_window(
        &mut self,
        ctx: &Context,
        id: WindowId,
        viewport: Viewport,
        keyboard: bool,
    ) -> Option<(WindowOutput, Option<Duration>)> {
        let record = self.manager.get(&id)?;
        let (title, icon, content, stored) = (record.title.clone(), record.icon.clone(), record.content, record.size);
        let view = self.views.get(&id)?;
        let fullscreen = view.is_fullscreen();
        let (origin, size) = view.placement(stored, viewport);
        let rect = Rect::from_min_size(Pos2::new(origin.x, origin.y), Vec2::new(size.width, size.height));
        let layer = window_layer(&id);

        let hosted = &mut self.hosted;
        let settings = &self.settings;
        let shown = egui::Area::new(layer.id)
            .order(Order::Middle)
            .fixed_pos(rect.min)
            .movable(false)
            .constrain(false)
            .show(ctx, |ui| {
                let (outer, _) = ui.allocate_exact_size(rect.size(), Sense::hover());
                let rounding = if fullscreen { 0.0 } else { WINDOW_ROUNDING };
                let stroke = if fullscreen { Stroke::NONE } else { Stroke::new(1.0, FolioColors::BORDER) };
                ui.painter().rect(outer, rounding, FolioColors::WINDOW, stroke);

                // Header sense goes in first so the control buttons win hit tests.
                let header_rect = Rect::from_min_size(outer.min, Vec2::new(outer.width(), HEADER_HEIGHT));
                let header = ui.interact(header_rect, layer.id.with("header"), Sense::click_and_drag());
                ui.painter().rect_filled(
                    header_rect,
                    Rounding { nw: rounding, ne: rounding, sw: 0.0, se: 0.0 },
                    FolioColors::HEADER,
                );

                let mut action = WindowAction::None;
                ui.allocate_ui_at_rect(header_rect.shrink2(Vec2::new(10.0, 4.0)), |ui| {
                    ui.horizontal_centered(|ui| {
                        ui.label(egui::RichText::new(&icon).size(16.0));
                        ui.label(egui::RichText::new(&title).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            action = window_control_buttons(ui, fullscreen);
                        });
                    });
                });

                let body = Rect::from_min_max(Pos2::new(outer.left(), header_rect.bottom()), outer.max);
                let mut wake = None;
                let mut panel = None;
                ui.allocate_ui_at_rect(body.shrink(BODY_MARGIN), |ui| {
                    ui.set_clip_rect(body.intersect(ui.clip_rect()));
                    (wake, panel) = hosted.show(ui, content, settings, keyboard);
                });
                (header, action, panel, wake)
            });

        let (header, action, panel, wake) = shown.inner;
        Some((
            WindowOutput {
                id,
                stored,
                origin,
                header,
                rect,
                layer: shown.response.layer_id,
                action,
                panel,
            },
            wake,
        ))
    }

    fn handle_window_output(&mut self, ctx: &Context, out: WindowOutput) {
        let (press, pressed) = ctx.input(|i| (i.pointer.press_origin(), i.pointer.any_pressed()));

        if let Some(view) = self.views.get_mut(&out.id) {
            if out.header.drag_started() {
                if let Some(pointer) = press {
                    view.pointer_down(to_position(pointer), out.origin, &mut self.manager);
                }
            }
            if out.header.double_clicked() {
                view.toggle_fullscreen(out.stored, &mut self.manager);
            }
            if pressed {
                if let Some(pointer) = press {
                    if out.rect.contains(pointer) && ctx.layer_id_at(pointer) == Some(out.layer) {
                        view.click_body(&mut self.manager);
                    }
                }
            }
        }

        match out.action {
            WindowAction::None => {}
            WindowAction::Minimize => self.manager.minimize(&out.id),
            WindowAction::Close => self.manager.close(&out.id),
            WindowAction::ToggleFullscreen => {
                if let Some(view) = self.views.get_mut(&out.id) {
                    view.toggle_fullscreen(out.stored, &mut self.manager);
                }
            }
        }

        if let Some(action) = out.panel {
            self.handle_panel_action(action);
        }
    }

    fn draw_windows(&mut self, ctx: &Context, viewport: Viewport) {
        let order: Vec<WindowId> = self.manager.visible().iter().map(|r| r.id.clone()).collect();
        let topmost = order.last().cloned();
        let keyboard_ok = !self.start_menu.is_open();

        let mut outputs = Vec::with_capacity(order.len());
        for id in order {
            let keyboard = keyboard_ok && topmost.as_ref() == Some(&id);
            if let Some((out, wake)) = self.draw_window(ctx, id, viewport, keyboard) {
                if let Some(delay) = wake {
                    self.repaint.repaint_after(delay);
                }
                outputs.push(out);
            }
        }
        for out in outputs {
            self.handle_window_output(ctx, out);
        }

        // Layer order follows the registry's stacking order.
        for record in self.manager.visible() {
            ctx.move_to_top(window_layer(&record.id));
        }
    }

    fn draw_start_menu(&mut self, ctx: &Context) {
        if !self.start_menu.is_open() {
            return;
        }
        let out = self.start_menu.show(ctx, ctx.screen_rect());
        if let Some(entry) = out.launch {
            self.launch(entry, Launcher::StartMenu);
            self.start_menu.close();
        } else if out.close {
            self.start_menu.close();
        } else {
            let press = ctx.input(|i| if i.pointer.any_pressed() { i.pointer.press_origin() } else { None });
            if start_menu::dismissed_by(press, out.rect, self.start_button) {
                self.start_menu.close();
            }
        }
    }

    // ---------------------------------------------------------------
    // Narrow screens
    // ---------------------------------------------------------------

    fn show_narrow(&mut self, ctx: &Context) {
        if let Some(view) = self.views.dragging_mut() {
            view.cancel_drag();
        }
        self.repaint.set_continuous(false);
        self.clock.stop();
        self.start_menu.close();
        self.hosted.on_hidden(Content::Snake);

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(FolioColors::WINDOW).inner_margin(egui::Margin::same(12.0)))
            .show(ctx, |ui| {
                action = self.narrow.show(ui, &RESUME);
            });
        if let Some(action) = action {
            self.handle_panel_action(action);
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_zoom_keys(ctx);

        let now = Instant::now();
        let viewport = Viewport::from(ctx.screen_rect());
        self.drain_events();

        if viewport.device_class().is_mobile() {
            self.show_narrow(ctx);
            self.repaint.end_frame(ctx);
            return;
        }

        self.clock.start(now);
        if let Some(delay) = self.clock.poll(now) {
            self.repaint.repaint_after(delay);
        }

        let entries = taskbar::entries(&self.manager);
        let status = self.fresh_status(now).map(|(text, fade)| (text.to_string(), fade));
        if let Some((_, fade)) = status {
            self.repaint.repaint_after(fade);
        }
        let status_text = status.as_ref().map(|(text, _)| text.as_str());
        let bar = taskbar::show(ctx, &entries, &self.clock, self.start_menu.is_open(), status_text);
        self.start_button = bar.start_rect;
        if bar.start_clicked {
            self.start_menu.toggle();
        }
        if let Some(entry) = bar.clicked {
            taskbar::click(&mut self.manager, &entry);
        }

        self.update_drag(ctx, viewport);
        self.views.sync(&self.manager);
        let dragging = self.views.dragging_mut().is_some();
        self.repaint.set_continuous(dragging);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_background(ui);
                self.draw_icons(ui);
            });

        self.draw_windows(ctx, viewport);
        self.draw_start_menu(ctx);

        // Surface this frame's changes now rather than on the next input.
        self.drain_events();
        self.views.sync(&self.manager);

        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliosnake::score::BestScore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app() -> (DesktopApp, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_dir: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };
        (DesktopApp::new(settings), dir)
    }

    #[test]
    fn test_describe_events() {
        let id = WindowId::new("about");
        assert_eq!(describe(&WindowEvent::Opened(id.clone()), "About Me").as_deref(), Some("About Me opened"));
        assert_eq!(describe(&WindowEvent::Minimized(id.clone()), "About Me").as_deref(), Some("About Me minimized"));
        assert_eq!(describe(&WindowEvent::Restored(id.clone()), "About Me").as_deref(), Some("About Me restored"));
        assert_eq!(describe(&WindowEvent::Closed(id.clone()), "About Me").as_deref(), Some("About Me closed"));
        assert_eq!(describe(&WindowEvent::Focused(id.clone()), "About Me"), None);
        assert_eq!(describe(&WindowEvent::Moved(id, Position::ORIGIN), "About Me"), None);
    }

    #[test]
    fn test_launch_uses_launcher_position() {
        let (mut app, _dir) = app();
        app.launch(catalog::find("about").unwrap(), Launcher::StartMenu);
        let record = app.manager.get(&WindowId::new("about")).unwrap();
        assert!(record.is_visible());
        assert_eq!(record.position, Position::new(100.0, 100.0));
    }

    #[test]
    fn test_events_feed_status_line() {
        let (mut app, _dir) = app();
        app.launch(catalog::find("skills").unwrap(), Launcher::Desktop);
        app.drain_events();
        let (text, _) = app.fresh_status(Instant::now()).unwrap();
        assert_eq!(text, "Skills opened");
    }

    #[test]
    fn test_status_fades() {
        let (mut app, _dir) = app();
        app.set_status("hello");
        let now = Instant::now();
        assert!(app.fresh_status(now).is_some());
        assert!(app.fresh_status(now + Duration::from_secs(STATUS_SECS + 1)).is_none());
    }

    #[test]
    fn test_minimizing_snake_pauses_it() {
        let (mut app, _dir) = app();
        let mut snake = SnakeApp::with_parts(BestScore::in_memory(), StdRng::seed_from_u64(7));
        snake.start(Instant::now());
        app.hosted.snake = Some(snake);

        app.launch(catalog::find("snake").unwrap(), Launcher::Desktop);
        app.manager.minimize(&WindowId::new("snake"));
        app.drain_events();

        let snake = app.hosted.snake.as_ref().unwrap();
        assert!(!snake.is_ticking());
        assert!(!snake.game().is_playing());
    }

    #[test]
    fn test_get_in_touch_opens_contact() {
        let (mut app, _dir) = app();
        app.handle_panel_action(PanelAction::Open(Content::Contact));
        let record = app.manager.get(&WindowId::new("contact")).unwrap();
        assert!(record.is_visible());
        assert_eq!(app.manager.topmost_visible().unwrap().id.as_str(), "contact");
    }
}
