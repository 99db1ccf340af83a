//! Window-free drawing
//!
//! Produces flat draw lists that any front end can paint. Nothing here
//! touches the match; it reads a `RenderView` or a `Raster`.

pub mod commands;

pub use commands::{DrawCommand, raster_commands, scene_commands};
