pub mod api;
pub mod cli;
pub mod config;
pub mod data_paths;
pub mod feeds;
pub mod gui;
pub mod logging;
pub mod prefs;
pub mod render;

// Re-export the GUI launcher function at the root level
pub use gui::launch_dashboard;
