//! Spatial frames
//!
//! A [`SpatialFrame`] is a position, rotation and scale relative to its
//! parent, plus the cached local and world matrices derived from them.
//! Frames can be used on their own (for example as interpolation results),
//! but inside a [`FrameHierarchy`](super::FrameHierarchy) they are only
//! mutated through the hierarchy, which keeps the dirty flags of the whole
//! subtree consistent.

use serde::{Deserialize, Serialize};

use crate::foundation::collections::{FrameHandle, NodeHandle};
use crate::foundation::math::{utils, Mat4, Quat, Vec3};

/// Below this angle slerp falls back to normalized linear interpolation
const SLERP_EPSILON: f32 = 1.0e-6;

/// Reference space for translations and rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Space {
    /// The frame's own rotated axes
    #[default]
    Local,
    /// The parent's axes, or world axes for a root frame
    World,
}

/// Position, rotation and scale with cached matrices
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialFrame {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,

    local_matrix: Mat4,
    world_matrix: Mat4,
    dirty: bool,

    pub(super) parent: Option<FrameHandle>,
    pub(super) children: Vec<FrameHandle>,
    pub(super) owner: Option<NodeHandle>,
}

impl Default for SpatialFrame {
    fn default() -> Self {
        Self::from_components(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl SpatialFrame {
    /// Create an identity frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame from explicit initial values
    pub fn from_components(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            local_matrix: Mat4::identity(),
            world_matrix: Mat4::identity(),
            dirty: true,
            parent: None,
            children: Vec::new(),
            owner: None,
        }
    }

    /// Create a frame with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation relative to the parent
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Component-wise scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Rotation as Euler angles in degrees
    pub fn euler_angles(&self) -> Vec3 {
        utils::euler_degrees_from_quat(&self.rotation)
    }

    /// Local -Z axis after rotation
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::z()
    }

    /// Local +X axis after rotation
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// Local +Y axis after rotation
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// Parent frame, if any
    pub fn parent(&self) -> Option<FrameHandle> {
        self.parent
    }

    /// Child frames in attachment order
    pub fn children(&self) -> &[FrameHandle] {
        &self.children
    }

    /// Scene node that owns this frame, if any
    pub fn owner(&self) -> Option<NodeHandle> {
        self.owner
    }

    /// Whether the cached matrices are stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Overwrite the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Overwrite the rotation. The input is renormalized.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = Quat::new_normalize(rotation.into_inner());
        self.dirty = true;
    }

    /// Overwrite the rotation from Euler angles in degrees
    pub fn set_rotation_euler(&mut self, degrees: Vec3) {
        self.rotation = utils::quat_from_euler_degrees(degrees);
        self.dirty = true;
    }

    /// Overwrite the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Move by `offset`, expressed in the frame's own axes for [`Space::Local`]
    pub fn translate(&mut self, offset: Vec3, space: Space) {
        self.position += match space {
            Space::Local => self.rotation * offset,
            Space::World => offset,
        };
        self.dirty = true;
    }

    /// Compose `delta` with the current rotation.
    ///
    /// [`Space::Local`] pre-multiplies (`delta * current`), [`Space::World`]
    /// post-multiplies (`current * delta`).
    pub fn rotate(&mut self, delta: Quat, space: Space) {
        let mut rotation = match space {
            Space::Local => delta * self.rotation,
            Space::World => self.rotation * delta,
        };
        rotation.renormalize();
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Rotate by `degrees` about `axis`
    pub fn rotate_axis_angle(&mut self, axis: Vec3, degrees: f32, space: Space) {
        self.rotate(utils::quat_from_axis_angle_degrees(axis, degrees), space);
    }

    /// Multiply the scale component-wise
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale.component_mul_assign(&factor);
        self.dirty = true;
    }

    /// Restore identity position, rotation and scale
    pub fn reset(&mut self) {
        self.position = Vec3::zeros();
        self.rotation = Quat::identity();
        self.scale = Vec3::new(1.0, 1.0, 1.0);
        self.dirty = true;
    }

    /// `T * R * S` for the current attributes, ignoring the cache
    pub fn compose_local(&self) -> Mat4 {
        utils::compose_trs(&self.position, &self.rotation, &self.scale)
    }

    /// Interpolate between two frames.
    ///
    /// Position and scale are blended linearly, rotation spherically along
    /// the shorter arc. The result is a detached frame.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let target = if a.rotation.coords.dot(&b.rotation.coords) < 0.0 {
            Quat::new_unchecked(-b.rotation.into_inner())
        } else {
            b.rotation
        };
        let rotation = a
            .rotation
            .try_slerp(&target, t, SLERP_EPSILON)
            .unwrap_or_else(|| a.rotation.nlerp(&target, t));

        Self::from_components(
            a.position.lerp(&b.position, t),
            rotation,
            a.scale.lerp(&b.scale, t),
        )
    }

    /// Same as [`SpatialFrame::lerp`]; rotation is always interpolated spherically
    pub fn slerp(a: &Self, b: &Self, t: f32) -> Self {
        Self::lerp(a, b, t)
    }

    /// Mark stale. Returns `true` if the frame was clean before.
    pub(super) fn mark_dirty(&mut self) -> bool {
        !std::mem::replace(&mut self.dirty, true)
    }

    /// Recompute both matrices against the parent's world matrix and clear the flag
    pub(super) fn refresh(&mut self, parent_world: Option<&Mat4>) {
        self.local_matrix = self.compose_local();
        self.world_matrix = match parent_world {
            Some(parent) => parent * self.local_matrix,
            None => self.local_matrix,
        };
        self.dirty = false;
    }

    pub(super) fn cached_local(&self) -> &Mat4 {
        &self.local_matrix
    }

    pub(super) fn cached_world(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Drop hierarchy links so the frame can be inserted elsewhere
    pub(super) fn detach(&mut self) {
        self.parent = None;
        self.children.clear();
        self.owner = None;
        self.dirty = true;
    }
}
