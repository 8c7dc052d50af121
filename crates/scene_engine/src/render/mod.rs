//! # Rendering Collaborators
//!
//! Everything the scene core needs from a graphics layer, and nothing more:
//!
//! - **GeometryRenderer**: "draw this primitive with this model matrix and color"
//! - **Color**: RGB values handed to the renderer
//! - **CompositeMesh**: prebuilt vertex and index data for composite shapes
//! - **RecordingRenderer**: headless backend that records draw calls
//!
//! Shading, buffer management, and windowing belong to the application's
//! renderer implementation.

pub mod color;
pub mod mesh;
pub mod recording;
pub mod renderer;

pub use color::Color;
pub use mesh::{CompositeMesh, Vertex};
pub use recording::{DrawCommand, DrawPrimitive, RecordingRenderer};
pub use renderer::{shared, GeometryRenderer, SharedRenderer};
