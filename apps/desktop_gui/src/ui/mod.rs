//! UI layer for desktop GUI: app shell, prediction screens, widgets and theme.

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::VitalisApp;
