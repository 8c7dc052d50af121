//! Scene management system
//!
//! Hierarchical transforms with lazily cached world matrices, plus a named
//! registry of drawable nodes built on top of them.
//!
//! ## Architecture
//!
//! ```text
//! SceneRegistry (names, insertion order, renderer)
//!      ↓
//! SceneNode (shape + color) ──owns──> FrameHandle
//!      ↓
//! FrameHierarchy (arena of SpatialFrame, parent/child links)
//! ```
//!
//! Frames cache both their local and world matrices. Mutating a frame marks it
//! and every descendant dirty; reading a world matrix recomputes only the
//! dirty part of the ancestor chain.

mod descriptors;
mod error;
mod frame;
mod hierarchy;
mod node;
mod registry;

#[cfg(test)]
mod tests;

pub use descriptors::{CubeDesc, CylinderDesc, LetterDesc, SphereDesc};
pub use error::{SceneError, SceneResult};
pub use frame::{Space, SpatialFrame};
pub use hierarchy::FrameHierarchy;
pub use node::{NodeMut, SceneNode, Shape, ShapeKind};
pub use registry::SceneRegistry;
