mod app;
mod effects;
mod logging;
mod persistence;
mod ui;

pub use app::{run_app, DEFAULT_ORIGIN};
