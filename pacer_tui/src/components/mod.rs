mod controls_panel;
mod ecg_viewer;
pub mod models;
mod root;

pub use controls_panel::ControlsPanel;
pub use ecg_viewer::EcgViewer;
pub use root::Root;
