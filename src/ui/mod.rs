//! UI module - terminal rendering and input

mod app;

pub use app::App;
