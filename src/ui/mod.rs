//! UI module - GPUI views and components
//!
//! - `components/` - The track list window and its rows
//! - `theme` - OS-aware light and dark mode color schemes

pub mod components;
pub mod theme;

pub use theme::Theme;
