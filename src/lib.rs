//! Two-dimensional control pad with a hold-to-open preset menu.
//!
//! The controller and everything under it are free of GUI types; `gui` hosts
//! them in an eframe window.

pub mod controller;
pub mod gesture;
pub mod gui;
pub mod host;
pub mod logging;
pub mod overlay;
pub mod preset_file;
pub mod presets;
pub mod shared_state;
pub mod timer;
