//! Ratatui front-end: an action selector, the input form, and a result panel.
//! All catalog logic lives in [`crate::actions`]; this layer only collects
//! fields and renders what comes back.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
