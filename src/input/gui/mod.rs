//! GUI input adapter for interactive fractal exploration.
//!
//! This module provides a windowed interface using winit for window management,
//! pixels for framebuffer rendering, and egui for the iteration panel.

mod app;
pub mod events;
mod run_gui;

pub use run_gui::{GuiError, run_gui};
