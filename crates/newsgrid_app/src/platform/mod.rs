mod app;
mod config;
mod effects;
mod logging;
mod opener;
mod ui;

pub use app::run_app;
