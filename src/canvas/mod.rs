//! Obsidian canvas support
//!
//! - [`screenshot`]: the `screenshot_canvas` tool
//! - [`model`]: contract types for Obsidian's internal canvas engine

pub mod model;
pub mod screenshot;

pub use screenshot::CanvasScreenshotTool;
