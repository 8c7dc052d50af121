//! # Scene Engine
//!
//! Hierarchical spatial transforms with lazily cached world matrices, and a
//! registry of named drawable objects built on them.
//!
//! ## Features
//!
//! - **Frame Hierarchy**: parent/child transforms stored in an arena, with cycle checks
//! - **Lazy World Matrices**: mutations mark subtrees dirty, reads recompute only what changed
//! - **Scene Registry**: named cubes, spheres, cylinders and letter meshes in insertion order
//! - **Pluggable Rendering**: any [`render::GeometryRenderer`] can draw the scene
//! - **Configuration**: TOML and RON settings for limits and primitive defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let (recorder, renderer) = shared(RecordingRenderer::new());
//!     let mut scene = SceneRegistry::new(Some(renderer));
//!
//!     let body = scene.create_cube("body", CubeDesc::default());
//!     let head = scene.create_sphere("head", SphereDesc::default().with_position(Vec3::new(0.0, 2.0, 0.0)));
//!     scene.add_child(body, head)?;
//!
//!     if let Some(mut body) = scene.object_mut(body) {
//!         body.translate(Vec3::new(1.0, 0.0, 0.0), Space::World)?;
//!     }
//!     scene.draw_all()?;
//!
//!     assert_eq!(recorder.borrow().len(), 2);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        core::config::{EngineConfig, HierarchyConfig, PrimitiveDefaults, SceneConfig},
        foundation::{
            collections::{FrameHandle, NodeHandle},
            math::{utils, Mat4, Quat, Vec3},
        },
        render::{shared, Color, CompositeMesh, GeometryRenderer, RecordingRenderer, SharedRenderer},
        scene::{
            CubeDesc, CylinderDesc, FrameHierarchy, LetterDesc, NodeMut, SceneError, SceneNode, SceneRegistry,
            SceneResult, Shape, ShapeKind, Space, SpatialFrame, SphereDesc,
        },
    };
}
