//! Tic-tac-toe panel. Runs standalone or inside a desktop window.

use crate::engine::{Game, Mark, Mode};
use egui::{Align2, Context, FontId, Rect, RichText, Sense, Stroke, Vec2};
use foliocore::repaint::RepaintController;
use foliocore::theme::{consume_zoom_keys, FolioColors};
use foliocore::widgets::{section_heading, stat};
use foliocore::Settings;
use std::time::{Duration, Instant};

const MAX_BOARD: f32 = 360.0;
const CELL_GAP: f32 = 6.0;

pub struct TicTacToeApp {
    game: Game,
    ai_delay: Duration,
    /// When the pending computer reply is due.
    ai_deadline: Option<Instant>,
    repaint: RepaintController,
}

impl Default for TicTacToeApp {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl TicTacToeApp {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: Game::new(Mode::TwoPlayer),
            ai_delay: Duration::from_millis(settings.ai_delay_ms),
            ai_deadline: None,
            repaint: RepaintController::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Human click on a cell. Arms the reply timer when the computer is up.
    pub fn click_cell(&mut self, index: usize, now: Instant) {
        if !self.game.play(index) {
            return;
        }
        if self.game.awaiting_ai() {
            self.ai_deadline = Some(now + self.ai_delay);
        }
    }

    pub fn new_game(&mut self) {
        self.game.reset();
        self.ai_deadline = None;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.game.set_mode(mode);
        self.ai_deadline = None;
    }

    /// Apply the computer's reply once its delay has passed. Returns how
    /// long until it is due, if one is still pending.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        if !self.game.awaiting_ai() {
            self.ai_deadline = None;
            return None;
        }
        let deadline = *self.ai_deadline.get_or_insert(now + self.ai_delay);
        if now >= deadline {
            self.ai_deadline = None;
            if let Some(index) = self.game.ai_move() {
                tracing::debug!(event = "tictactoe.ai.moved", cell = index);
            }
            return None;
        }
        Some(deadline - now)
    }

    /// Draw the panel. Returns the delay before the next frame is needed.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<Duration> {
        let now = Instant::now();
        self.poll(now);

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            section_heading(ui, "⭕", "Tic Tac Toe");
            self.render_mode_buttons(ui);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(self.game.status_text()).strong().size(16.0));
            });
            ui.add_space(8.0);
            self.render_board(ui, now);
            ui.add_space(8.0);
            self.render_scores(ui);
            ui.add_space(8.0);
            self.render_controls(ui);
        });

        // A click above may have armed the reply.
        self.ai_deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    fn render_mode_buttons(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |cols| {
            for (col, (mode, label)) in cols.iter_mut().zip([(Mode::TwoPlayer, "2 Players"), (Mode::VsAi, "vs AI")]) {
                let selected = self.game.mode() == mode;
                let fill = if selected { FolioColors::ACCENT.gamma_multiply(0.6) } else { FolioColors::PANEL };
                let button = egui::Button::new(label).fill(fill).min_size(Vec2::new(col.available_width(), 30.0));
                if col.add(button).clicked() {
                    self.set_mode(mode);
                }
            }
        });
    }

    fn render_board(&mut self, ui: &mut egui::Ui, now: Instant) {
        let side = ui.available_width().min(MAX_BOARD);
        let cell = (side - 2.0 * CELL_GAP) / 3.0;
        let (outer, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), side), Sense::hover());
        let origin = egui::pos2(outer.center().x - side / 2.0, outer.min.y);

        for index in 0..9 {
            let (row, col) = (index / 3, index % 3);
            let rect = Rect::from_min_size(
                origin + Vec2::new(col as f32 * (cell + CELL_GAP), row as f32 * (cell + CELL_GAP)),
                Vec2::splat(cell),
            );
            let playable = self.game.can_play(index);
            let sense = if playable { Sense::click() } else { Sense::hover() };
            let response = ui.interact(rect, ui.id().with(("ttt_cell", index)), sense);

            let painter = ui.painter();
            let fill = if playable && response.hovered() { FolioColors::HEADER } else { FolioColors::PANEL };
            let border = if playable && response.hovered() { FolioColors::ACCENT } else { FolioColors::BORDER };
            painter.rect_filled(rect, 8.0, fill);
            painter.rect_stroke(rect, 8.0, Stroke::new(2.0, border));

            if let Some(mark) = self.game.board().get(index) {
                let color = match mark {
                    Mark::X => FolioColors::ACCENT,
                    Mark::O => FolioColors::BAD,
                };
                painter.text(rect.center(), Align2::CENTER_CENTER, mark.symbol(), FontId::proportional(cell * 0.5), color);
            }

            if response.clicked() {
                self.click_cell(index, now);
            }
        }
    }

    fn render_scores(&self, ui: &mut egui::Ui) {
        let scores = self.game.scores();
        let o_label = match self.game.mode() {
            Mode::VsAi => "AI",
            Mode::TwoPlayer => "Player O",
        };
        foliocore::theme::FolioTheme::card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| ui.label(RichText::new("Scores").strong()));
            ui.columns(3, |cols| {
                stat(&mut cols[0], scores.x, "Player X", FolioColors::ACCENT);
                stat(&mut cols[1], scores.draws, "Draws", FolioColors::MUTED);
                stat(&mut cols[2], scores.o, o_label, FolioColors::BAD);
            });
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |cols| {
            let width = cols[0].available_width();
            let new_game = egui::Button::new(RichText::new("New Game").strong())
                .fill(FolioColors::GOOD.gamma_multiply(0.5))
                .min_size(Vec2::new(width, 36.0));
            if cols[0].add(new_game).clicked() {
                self.new_game();
            }
            let reset = egui::Button::new(RichText::new("Reset Scores").strong())
                .fill(FolioColors::BAD.gamma_multiply(0.5))
                .min_size(Vec2::new(width, 36.0));
            if cols[1].add(reset).clicked() {
                self.game.reset_scores();
            }
        });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();
        consume_zoom_keys(ctx);

        let mut wake = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(FolioColors::WINDOW).inner_margin(egui::Margin::same(16.0)))
            .show(ctx, |ui| {
                wake = self.show(ui);
            });

        if let Some(delay) = wake {
            self.repaint.repaint_after(delay);
        }
        self.repaint.end_frame(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(delay_ms: u64) -> TicTacToeApp {
        TicTacToeApp::new(&Settings {
            ai_delay_ms: delay_ms,
            ..Settings::default()
        })
    }

    #[test]
    fn test_ai_reply_waits_for_delay() {
        let mut app = app(500);
        app.set_mode(Mode::VsAi);
        let t0 = Instant::now();
        app.click_cell(4, t0);

        assert_eq!(app.poll(t0 + Duration::from_millis(100)), Some(Duration::from_millis(400)));
        assert_eq!(app.game().board().available_moves().len(), 8);

        assert_eq!(app.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(app.game().board().available_moves().len(), 7);
        assert_eq!(app.game().current(), Mark::X);
    }

    #[test]
    fn test_new_game_drops_pending_reply() {
        let mut app = app(500);
        app.set_mode(Mode::VsAi);
        let t0 = Instant::now();
        app.click_cell(0, t0);
        app.new_game();
        assert_eq!(app.poll(t0 + Duration::from_secs(1)), None);
        assert_eq!(app.game().board().available_moves().len(), 9);
    }

    #[test]
    fn test_two_player_never_schedules() {
        let mut app = app(500);
        let t0 = Instant::now();
        app.click_cell(0, t0);
        assert_eq!(app.poll(t0), None);
        assert_eq!(app.game().current(), Mark::O);
    }
}
