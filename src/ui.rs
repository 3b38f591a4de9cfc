//! Ratatui operator console: a Songs tab, a Scripture tab, a preview panel,
//! and a full-screen projection view.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
