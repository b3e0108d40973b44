// Display module - Handles the window surface and colors
//
// This module provides:
// - RGBA8888 color decoding
// - Window + renderer lifecycle (initialize, clear, present, shutdown)

pub mod color;
pub mod surface;

pub use color::{parse_color, Rgba};
pub use surface::{window_spec, DisplaySurface, WINDOW_TITLE};
