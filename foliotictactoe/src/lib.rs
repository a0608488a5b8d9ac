//! foliotictactoe: tic-tac-toe with an unbeatable minimax opponent

pub mod app;
pub mod engine;

pub use app::TicTacToeApp;
