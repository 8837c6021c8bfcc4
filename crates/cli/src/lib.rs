//! Resume Builder CLI - interactive terminal form and batch rendering

pub mod app;
pub mod config;
pub mod input;
pub mod keymap;
pub mod logging;
pub mod ui;

pub use app::App;
pub use config::{Config, ConfigArgs};
