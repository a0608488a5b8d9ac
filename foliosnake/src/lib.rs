//! foliosnake: the classic snake game

pub mod app;
pub mod engine;
pub mod score;

pub use app::SnakeApp;
