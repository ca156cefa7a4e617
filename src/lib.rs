// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod config;
pub mod filter;
pub mod keybind;
pub mod palette;
pub mod registry;
pub mod render;
pub mod session;
pub mod tui;
