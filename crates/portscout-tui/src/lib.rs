// Terminal UI for browsing the ports catalog
pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, InputMode, PanelEntry};
pub use runner::run_tui;
