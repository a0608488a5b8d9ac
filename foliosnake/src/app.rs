//! Snake panel. Runs standalone or inside a desktop window.

use crate::engine::{Direction, SnakeGame, Status, TickOutcome, BOARD_SIZE};
use crate::score::BestScore;
use egui::{Color32, Context, Key, Rect, RichText, Sense, Stroke, Vec2};
use foliocore::repaint::RepaintController;
use foliocore::storage::KeyValueStore;
use foliocore::theme::{consume_zoom_keys, FolioColors, FolioTheme};
use foliocore::widgets::{section_heading, stat};
use foliocore::{Settings, Ticker};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const MAX_BOARD: f32 = 400.0;
const SNAKE_HEAD: Color32 = Color32::from_rgb(74, 222, 128);
const SNAKE_BODY: Color32 = Color32::from_rgb(22, 163, 74);
const FOOD: Color32 = Color32::from_rgb(239, 68, 68);
const EMPTY: Color32 = Color32::from_rgb(31, 41, 55);

fn big(text: &str, fill: Color32, width: f32) -> egui::Button<'static> {
    egui::Button::new(RichText::new(text).strong())
        .fill(fill)
        .min_size(Vec2::new(width, 36.0))
}

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
}

/// Arrow keys, WASD and space.
pub fn key_command(key: Key) -> Option<Command> {
    match key {
        Key::ArrowUp | Key::W => Some(Command::Turn(Direction::Up)),
        Key::ArrowDown | Key::S => Some(Command::Turn(Direction::Down)),
        Key::ArrowLeft | Key::A => Some(Command::Turn(Direction::Left)),
        Key::ArrowRight | Key::D => Some(Command::Turn(Direction::Right)),
        Key::Space => Some(Command::TogglePause),
        _ => None,
    }
}

pub struct SnakeApp {
    game: SnakeGame,
    ticker: Ticker,
    best: BestScore,
    rng: StdRng,
    repaint: RepaintController,
}

impl SnakeApp {
    /// Best score comes from the store in the configured data directory.
    pub fn new(settings: &Settings) -> Self {
        let store = KeyValueStore::open_in(&settings.data_dir());
        Self::with_parts(BestScore::load(store), StdRng::from_entropy())
    }

    pub fn with_parts(best: BestScore, rng: StdRng) -> Self {
        let game = SnakeGame::new();
        Self {
            ticker: Ticker::new(game.interval()),
            game,
            best,
            rng,
            repaint: RepaintController::new(),
        }
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    pub fn best_score(&self) -> u32 {
        self.best.best()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn start(&mut self, now: Instant) {
        self.game.start();
        self.ticker.set_interval(self.game.interval());
        self.ticker.start(now);
        tracing::debug!(event = "snake.game.started");
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.game.toggle_pause();
        if self.game.is_playing() {
            self.ticker.start(now);
        } else {
            self.ticker.stop();
        }
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.ticker.stop();
        self.ticker.set_interval(self.game.interval());
    }

    /// The hosting window was closed or minimized.
    pub fn on_hidden(&mut self) {
        if self.game.is_playing() {
            self.game.toggle_pause();
        }
        self.ticker.stop();
    }

    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Turn(direction) => {
                self.game.turn(direction);
            }
            Command::TogglePause => self.toggle_pause(now),
        }
    }

    /// Run every step that came due. Returns the time until the next one.
    pub fn advance(&mut self, now: Instant) -> Option<Duration> {
        for _ in 0..self.ticker.poll(now) {
            match self.game.tick(&mut self.rng) {
                TickOutcome::Moved => {}
                TickOutcome::Ate => {
                    self.ticker.set_interval(self.game.interval());
                    if self.best.observe(self.game.score()) {
                        tracing::debug!(event = "snake.best.raised", best = self.best.best());
                    }
                }
                TickOutcome::GameOver | TickOutcome::Idle => {
                    self.ticker.stop();
                    break;
                }
            }
        }
        self.ticker.next_deadline(now)
    }

    fn handle_keys(&mut self, ctx: &Context, now: Instant) {
        let commands: Vec<Command> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, repeat: false, .. } => key_command(*key),
                    _ => None,
                })
                .collect()
        });
        for command in commands {
            self.apply(command, now);
        }
    }

    /// Draw the panel. Keys are read only when `keyboard` is true, so a
    /// host can route them to the focused window. Returns the delay before
    /// the next frame is needed.
    pub fn show(&mut self, ui: &mut egui::Ui, keyboard: bool) -> Option<Duration> {
        let now = Instant::now();
        if keyboard {
            self.handle_keys(ui.ctx(), now);
        }
        self.advance(now);

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            section_heading(ui, "🐍", "Snake Game");
            ui.columns(2, |cols| {
                FolioTheme::card_frame().show(&mut cols[0], |ui| {
                    stat(ui, self.game.score(), "Score", FolioColors::GOOD);
                });
                FolioTheme::card_frame().show(&mut cols[1], |ui| {
                    stat(ui, self.best.best(), "High Score", FolioColors::WARN);
                });
            });
            ui.add_space(8.0);
            self.render_board(ui);
            ui.add_space(8.0);
            let status_color = match self.game.status() {
                Status::GameOver => FolioColors::BAD,
                Status::Playing => FolioColors::GOOD,
                Status::Ready | Status::Paused => FolioColors::WARN,
            };
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(self.game.status_text()).color(status_color).strong());
            });
            ui.add_space(8.0);
            self.render_controls(ui, now);
            ui.add_space(8.0);
            self.render_touch_pad(ui, now);
        });

        // Buttons above may have started or stopped the ticker.
        self.ticker.next_deadline(now)
    }

    fn render_board(&self, ui: &mut egui::Ui) {
        let side = ui.available_width().min(MAX_BOARD);
        let cell = side / BOARD_SIZE as f32;
        let (outer, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), side), Sense::hover());
        let board = Rect::from_min_size(egui::pos2(outer.center().x - side / 2.0, outer.min.y), Vec2::splat(side));
        let painter = ui.painter_at(board);

        painter.rect_filled(board, 6.0, Color32::BLACK);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let rect = Rect::from_min_size(
                    board.min + Vec2::new(x as f32 * cell, y as f32 * cell),
                    Vec2::splat(cell),
                )
                .shrink(0.5);
                painter.rect_filled(rect, 0.0, EMPTY);
            }
        }

        let cell_rect = |c: crate::engine::Cell| {
            Rect::from_min_size(board.min + Vec2::new(c.x as f32 * cell, c.y as f32 * cell), Vec2::splat(cell))
                .shrink(0.5)
        };
        let food = cell_rect(self.game.food());
        painter.circle_filled(food.center(), cell * 0.45, FOOD);
        for (i, segment) in self.game.snake().iter().enumerate() {
            let (color, rounding) = if i == 0 { (SNAKE_HEAD, 2.0) } else { (SNAKE_BODY, 0.0) };
            painter.rect_filled(cell_rect(*segment), rounding, color);
        }
        painter.rect_stroke(board, 6.0, Stroke::new(2.0, FolioColors::BORDER));
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.columns(2, |cols| {
            let half = cols[0].available_width();
            match self.game.status() {
                Status::Ready => {
                    if cols[0].add(big("Start Game", FolioColors::GOOD.gamma_multiply(0.5), half)).clicked() {
                        self.start(now);
                    }
                }
                Status::Playing | Status::Paused => {
                    let label = if self.game.is_playing() { "Pause" } else { "Resume" };
                    if cols[0].add(big(label, FolioColors::WARN.gamma_multiply(0.5), half)).clicked() {
                        self.toggle_pause(now);
                    }
                }
                Status::GameOver => {
                    if cols[0].add(big("Play Again", FolioColors::ACCENT.gamma_multiply(0.5), half)).clicked() {
                        self.start(now);
                    }
                }
            }
            if cols[1].add(big("Reset", FolioColors::PANEL, half)).clicked() {
                self.reset();
            }
        });
    }

    fn render_touch_pad(&mut self, ui: &mut egui::Ui, now: Instant) {
        let enabled = self.game.is_playing();
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Arrow Keys / WASD").small().color(FolioColors::MUTED));
        });
        let pad = Vec2::new(48.0, 40.0);
        let mut pressed = None;
        ui.vertical_centered(|ui| {
            if ui.add_enabled(enabled, egui::Button::new("↑").min_size(pad)).clicked() {
                pressed = Some(Direction::Up);
            }
        });
        ui.horizontal(|ui| {
            let total = pad.x * 3.0 + ui.spacing().item_spacing.x * 2.0;
            ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));
            for (label, direction) in [("←", Direction::Left), ("↓", Direction::Down), ("→", Direction::Right)] {
                if ui.add_enabled(enabled, egui::Button::new(label).min_size(pad)).clicked() {
                    pressed = Some(direction);
                }
            }
        });
        if let Some(direction) = pressed {
            self.apply(Command::Turn(direction), now);
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_zoom_keys(ctx);

        let mut wake = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(FolioColors::WINDOW).inner_margin(egui::Margin::same(16.0)))
            .show(ctx, |ui| {
                wake = self.show(ui, true);
            });

        if let Some(delay) = wake {
            self.repaint.repaint_after(delay);
        }
        self.repaint.end_frame(ctx);
    }
}
