mod app;
mod effects;
mod input;
mod persistence;
mod ui;

pub use app::run_app;
