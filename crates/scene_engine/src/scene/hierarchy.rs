//! Frame hierarchy
//!
//! All frames live in one generation-checked arena and refer to each other by
//! [`FrameHandle`]. Every mutation goes through [`FrameHierarchy`], which
//! keeps two invariants:
//!
//! - a frame is listed in its parent's children exactly when its parent link
//!   points at that parent;
//! - a dirty frame has only dirty descendants.
//!
//! The second one makes lazy recomputation independent of query order: asking
//! for any frame's world matrix refreshes exactly the stale part of its
//! ancestor chain, top-down.

use std::ops::Index;

use crate::core::config::HierarchyConfig;
use crate::foundation::collections::{FrameHandle, NodeHandle, SlotMap};
use crate::foundation::math::{utils, Mat4, Point3, Quat, Vec3};

use super::error::{SceneError, SceneResult};
use super::frame::{Space, SpatialFrame};

/// Arena of spatial frames linked into a forest
#[derive(Debug, Clone)]
pub struct FrameHierarchy {
    frames: SlotMap<FrameHandle, SpatialFrame>,
    config: HierarchyConfig,
}

impl Default for FrameHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHierarchy {
    /// Create an empty hierarchy with default limits
    pub fn new() -> Self {
        Self::with_config(HierarchyConfig::default())
    }

    /// Create an empty hierarchy with explicit limits
    pub fn with_config(config: HierarchyConfig) -> Self {
        Self {
            frames: SlotMap::with_key(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Create an identity root frame
    pub fn create(&mut self) -> FrameHandle {
        self.insert(SpatialFrame::new())
    }

    /// Create a root frame from explicit initial values
    pub fn create_with(&mut self, position: Vec3, rotation: Quat, scale: Vec3) -> FrameHandle {
        self.warn_if_degenerate(scale);
        self.insert(SpatialFrame::from_components(position, rotation, scale))
    }

    /// Insert a frame as a new root. Any links it carried are dropped.
    pub fn insert(&mut self, mut frame: SpatialFrame) -> FrameHandle {
        frame.detach();
        self.frames.insert(frame)
    }

    /// Remove a frame. Its children become roots; its handle goes stale.
    ///
    /// Returns the removed frame, detached from the hierarchy.
    pub fn destroy(&mut self, handle: FrameHandle) -> Option<SpatialFrame> {
        let mut frame = self.frames.remove(handle)?;

        if let Some(parent) = frame.parent {
            if let Some(parent_frame) = self.frames.get_mut(parent) {
                parent_frame.children.retain(|&child| child != handle);
            }
        }

        for &child in &frame.children {
            if let Some(child_frame) = self.frames.get_mut(child) {
                child_frame.parent = None;
            }
            self.invalidate(child);
        }

        log::debug!(
            "destroyed frame {handle:?}, orphaned {} children",
            frame.children.len()
        );
        frame.detach();
        Some(frame)
    }

    /// Remove every frame
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Whether `handle` refers to a live frame
    pub fn contains(&self, handle: FrameHandle) -> bool {
        self.frames.contains_key(handle)
    }

    /// Number of live frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the hierarchy holds no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Read a frame's attributes and links
    pub fn get(&self, handle: FrameHandle) -> Option<&SpatialFrame> {
        self.frames.get(handle)
    }

    /// All live frames in arena order
    pub fn iter(&self) -> impl Iterator<Item = (FrameHandle, &SpatialFrame)> {
        self.frames.iter()
    }

    /// Frames without a parent
    pub fn roots(&self) -> impl Iterator<Item = FrameHandle> + '_ {
        self.frames
            .iter()
            .filter(|(_, frame)| frame.parent.is_none())
            .map(|(handle, _)| handle)
    }

    /// Overwrite the position
    pub fn set_position(&mut self, handle: FrameHandle, position: Vec3) -> SceneResult<()> {
        self.modify(handle, |frame| frame.set_position(position))
    }

    /// Overwrite the rotation (renormalized)
    pub fn set_rotation(&mut self, handle: FrameHandle, rotation: Quat) -> SceneResult<()> {
        self.modify(handle, |frame| frame.set_rotation(rotation))
    }

    /// Overwrite the rotation from Euler angles in degrees
    pub fn set_rotation_euler(&mut self, handle: FrameHandle, degrees: Vec3) -> SceneResult<()> {
        self.modify(handle, |frame| frame.set_rotation_euler(degrees))
    }

    /// Overwrite the scale
    pub fn set_scale(&mut self, handle: FrameHandle, scale: Vec3) -> SceneResult<()> {
        self.warn_if_degenerate(scale);
        self.modify(handle, |frame| frame.set_scale(scale))
    }

    /// Move by `offset` in the given space
    pub fn translate(&mut self, handle: FrameHandle, offset: Vec3, space: Space) -> SceneResult<()> {
        self.modify(handle, |frame| frame.translate(offset, space))
    }

    /// Compose a rotation in the given space
    pub fn rotate(&mut self, handle: FrameHandle, delta: Quat, space: Space) -> SceneResult<()> {
        self.modify(handle, |frame| frame.rotate(delta, space))
    }

    /// Rotate by `degrees` about `axis` in the given space
    pub fn rotate_axis_angle(
        &mut self,
        handle: FrameHandle,
        axis: Vec3,
        degrees: f32,
        space: Space,
    ) -> SceneResult<()> {
        self.modify(handle, |frame| frame.rotate_axis_angle(axis, degrees, space))
    }

    /// Multiply the scale component-wise
    pub fn scale_by(&mut self, handle: FrameHandle, factor: Vec3) -> SceneResult<()> {
        self.modify(handle, |frame| frame.scale_by(factor))?;
        let scale = self.frame(handle)?.scale();
        self.warn_if_degenerate(scale);
        Ok(())
    }

    /// Restore identity position, rotation and scale
    pub fn reset(&mut self, handle: FrameHandle) -> SceneResult<()> {
        self.modify(handle, SpatialFrame::reset)
    }

    /// Matrix relative to the parent, recomputed first if stale
    pub fn local_matrix(&mut self, handle: FrameHandle) -> SceneResult<Mat4> {
        self.update(handle)?;
        Ok(*self.frame(handle)?.cached_local())
    }

    /// Matrix relative to the world, recomputed first if stale.
    ///
    /// Stale ancestors are refreshed on the way, so the result is correct
    /// regardless of which frames were queried before.
    pub fn world_matrix(&mut self, handle: FrameHandle) -> SceneResult<Mat4> {
        self.update(handle)?;
        Ok(*self.frame(handle)?.cached_world())
    }

    /// Attach `child` under `parent`, or make it a root with `None`.
    ///
    /// No-op when `parent` is already the current parent. Rejects
    /// self-parenting and any parent that descends from `child`.
    pub fn set_parent(&mut self, child: FrameHandle, parent: Option<FrameHandle>) -> SceneResult<()> {
        let current = self.frame(child)?.parent;
        if current == parent {
            return Ok(());
        }

        if let Some(parent) = parent {
            self.frame(parent)?;
            self.check_ancestry(child, parent)?;
        }

        if let Some(old_parent) = current {
            if let Some(old_frame) = self.frames.get_mut(old_parent) {
                old_frame.children.retain(|&handle| handle != child);
            }
        }

        self.frame_mut(child)?.parent = parent;
        if let Some(parent) = parent {
            self.frame_mut(parent)?.children.push(child);
        }
        self.invalidate(child);

        log::debug!("reparented frame {child:?}: {current:?} -> {parent:?}");
        Ok(())
    }

    /// Attach `child` under `parent`
    pub fn add_child(&mut self, parent: FrameHandle, child: FrameHandle) -> SceneResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` from `parent`, making it a root.
    ///
    /// Returns `false` without changes if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: FrameHandle, child: FrameHandle) -> SceneResult<bool> {
        self.frame(parent)?;
        if self.frame(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.set_parent(child, None)?;
        Ok(true)
    }

    /// Parent of a frame; `None` for roots and stale handles
    pub fn parent(&self, handle: FrameHandle) -> Option<FrameHandle> {
        self.frames.get(handle).and_then(SpatialFrame::parent)
    }

    /// Children of a frame; empty for leaves and stale handles
    pub fn children(&self, handle: FrameHandle) -> &[FrameHandle] {
        self.frames
            .get(handle)
            .map_or(&[] as &[FrameHandle], SpatialFrame::children)
    }

    /// Number of ancestors above a frame
    pub fn depth(&self, handle: FrameHandle) -> Option<usize> {
        let mut cursor = self.frames.get(handle)?.parent;
        let mut depth = 0;
        while let Some(ancestor) = cursor {
            depth += 1;
            cursor = self.frames.get(ancestor).and_then(SpatialFrame::parent);
        }
        Some(depth)
    }

    /// Map a point from the frame's local space to world space
    pub fn transform_point(&mut self, handle: FrameHandle, point: Vec3) -> SceneResult<Vec3> {
        let world = self.world_matrix(handle)?;
        Ok(world.transform_point(&Point3::from(point)).coords)
    }

    /// Map a world-space point into the frame's local space
    pub fn inverse_transform_point(&mut self, handle: FrameHandle, point: Vec3) -> SceneResult<Vec3> {
        let inverse = self
            .world_matrix(handle)?
            .try_inverse()
            .ok_or(SceneError::SingularMatrix(handle))?;
        Ok(inverse.transform_point(&Point3::from(point)).coords)
    }

    /// Node that owns a frame
    pub fn owner(&self, handle: FrameHandle) -> Option<NodeHandle> {
        self.frames.get(handle).and_then(SpatialFrame::owner)
    }

    /// Record the owning node. Returns `false` for a stale frame.
    pub(crate) fn set_owner(&mut self, handle: FrameHandle, owner: Option<NodeHandle>) -> bool {
        self.frames
            .get_mut(handle)
            .map(|frame| frame.owner = owner)
            .is_some()
    }

    fn frame(&self, handle: FrameHandle) -> SceneResult<&SpatialFrame> {
        self.frames.get(handle).ok_or(SceneError::InvalidFrame(handle))
    }

    fn frame_mut(&mut self, handle: FrameHandle) -> SceneResult<&mut SpatialFrame> {
        self.frames
            .get_mut(handle)
            .ok_or(SceneError::InvalidFrame(handle))
    }

    fn modify(&mut self, handle: FrameHandle, edit: impl FnOnce(&mut SpatialFrame)) -> SceneResult<()> {
        edit(self.frame_mut(handle)?);
        self.invalidate(handle);
        Ok(())
    }

    /// Mark a frame and every descendant dirty.
    ///
    /// Descendants that are already dirty are skipped along with their
    /// subtrees, which are dirty as well.
    fn invalidate(&mut self, handle: FrameHandle) {
        let mut pending = match self.frames.get_mut(handle) {
            Some(frame) => {
                frame.mark_dirty();
                frame.children.clone()
            }
            None => return,
        };

        while let Some(current) = pending.pop() {
            if let Some(frame) = self.frames.get_mut(current) {
                if frame.mark_dirty() {
                    pending.extend_from_slice(&frame.children);
                }
            }
        }
    }

    /// Refresh the stale part of the ancestor chain of `handle`, root first
    fn update(&mut self, handle: FrameHandle) -> SceneResult<()> {
        if !self.frame(handle)?.is_dirty() {
            return Ok(());
        }

        let mut chain = vec![handle];
        let mut cursor = self.frame(handle)?.parent;
        while let Some(ancestor) = cursor {
            match self.frames.get(ancestor) {
                Some(frame) if frame.is_dirty() => {
                    chain.push(ancestor);
                    cursor = frame.parent;
                }
                _ => break,
            }
        }

        for &current in chain.iter().rev() {
            let parent_world = self
                .frames
                .get(current)
                .and_then(SpatialFrame::parent)
                .and_then(|parent| self.frames.get(parent))
                .map(|parent| *parent.cached_world());

            let children = match self.frames.get_mut(current) {
                Some(frame) => {
                    frame.refresh(parent_world.as_ref());
                    frame.children.clone()
                }
                None => continue,
            };
            log::trace!("recomputed matrices for frame {current:?}");

            for child in children {
                if let Some(child_frame) = self.frames.get_mut(child) {
                    child_frame.mark_dirty();
                }
            }
        }
        Ok(())
    }

    fn check_ancestry(&self, child: FrameHandle, parent: FrameHandle) -> SceneResult<()> {
        let mut cursor = Some(parent);
        let mut depth = 0;
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SceneError::CycleDetected { child, parent });
            }
            depth += 1;
            if depth > self.config.max_depth {
                return Err(SceneError::HierarchyTooDeep(self.config.max_depth));
            }
            cursor = self.frames.get(ancestor).and_then(SpatialFrame::parent);
        }
        Ok(())
    }

    fn warn_if_degenerate(&self, scale: Vec3) {
        if self.config.warn_on_degenerate_scale && utils::is_degenerate_scale(&scale) {
            log::warn!("degenerate scale {scale:?}; inverse transforms will fail");
        }
    }
}

impl Index<FrameHandle> for FrameHierarchy {
    type Output = SpatialFrame;

    /// # Panics
    ///
    /// Panics if `handle` is stale, like indexing a slot map.
    fn index(&self, handle: FrameHandle) -> &SpatialFrame {
        &self.frames[handle]
    }
}
