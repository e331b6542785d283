pub mod app;
pub mod grid_canvas;
pub mod toolbar;
pub mod upload_panel;
