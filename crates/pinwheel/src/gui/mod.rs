pub mod actions;
pub mod app;
pub mod host;
pub mod render;
pub mod theme;
pub mod widget;
