//! Errors reported by the frame hierarchy and scene registry

use thiserror::Error;

use crate::foundation::collections::{FrameHandle, NodeHandle};

/// Result type used throughout the scene module
pub type SceneResult<T> = Result<T, SceneError>;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The frame was destroyed or never belonged to this hierarchy
    #[error("Invalid frame handle: {0:?}")]
    InvalidFrame(FrameHandle),

    /// The node was removed or never belonged to this registry
    #[error("Invalid node handle: {0:?}")]
    InvalidNode(NodeHandle),

    /// Parenting would make a frame its own ancestor
    #[error("Parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Frame being reparented
        child: FrameHandle,
        /// Proposed parent
        parent: FrameHandle,
    },

    /// The proposed parent's ancestor chain exceeds the configured limit
    #[error("Hierarchy deeper than {0} levels")]
    HierarchyTooDeep(usize),

    /// The world matrix has no inverse, typically because of a zero scale
    #[error("World matrix of frame {0:?} is not invertible")]
    SingularMatrix(FrameHandle),

    /// The shared renderer is already borrowed elsewhere
    #[error("Renderer is busy: {0}")]
    RendererBusy(String),
}
