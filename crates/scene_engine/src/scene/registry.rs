//! Scene Registry - owner of every scene node
//!
//! The registry creates nodes, gives them unique names, and keeps three views
//! of them consistent:
//!
//! 1. the node arena, keyed by [`NodeHandle`];
//! 2. insertion order, used for index access and drawing;
//! 3. the name index, where the most recent node created under a name wins.
//!
//! Each node owns one frame in the registry's [`FrameHierarchy`]. Removing a
//! node destroys its frame, so its child nodes become roots.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::config::HierarchyConfig;
use crate::foundation::collections::{FrameHandle, NodeHandle, SlotMap};
use crate::foundation::math::{utils, Mat4, Quat, Vec3};
use crate::render::{Color, SharedRenderer};

use super::descriptors::{CubeDesc, CylinderDesc, LetterDesc, SphereDesc};
use super::error::{SceneError, SceneResult};
use super::frame::Space;
use super::hierarchy::FrameHierarchy;
use super::node::{NodeMut, SceneNode, Shape, ShapeKind};

/// Process-wide counter for generated names, never reused
static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

fn generate_name(kind: ShapeKind) -> String {
    let id = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}_{id}", kind.prefix())
}

/// Named collection of scene nodes sharing one renderer
pub struct SceneRegistry {
    pub(super) nodes: SlotMap<NodeHandle, SceneNode>,
    pub(super) frames: FrameHierarchy,
    order: Vec<NodeHandle>,
    names: HashMap<String, NodeHandle>,
    renderer: Option<SharedRenderer>,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new(renderer: Option<SharedRenderer>) -> Self {
        Self::with_config(renderer, HierarchyConfig::default())
    }

    /// Create an empty registry with explicit hierarchy limits
    pub fn with_config(renderer: Option<SharedRenderer>, config: HierarchyConfig) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            frames: FrameHierarchy::with_config(config),
            order: Vec::new(),
            names: HashMap::new(),
            renderer,
        }
    }

    /// Create a cube. An empty `name` generates `Cube_<n>`.
    pub fn create_cube(&mut self, name: &str, desc: CubeDesc) -> NodeHandle {
        let frame = self.frames.create_with(
            desc.position,
            utils::quat_from_euler_degrees(desc.rotation),
            desc.scale,
        );
        self.insert_node(name, frame, Shape::Cube, desc.color)
    }

    /// Create a sphere. An empty `name` generates `Sphere_<n>`.
    pub fn create_sphere(&mut self, name: &str, desc: SphereDesc) -> NodeHandle {
        let frame = self.create_positioned_frame(desc.position);
        self.insert_node(name, frame, Shape::Sphere { radius: desc.radius }, desc.color)
    }

    /// Create a cylinder. An empty `name` generates `Cylinder_<n>`.
    pub fn create_cylinder(&mut self, name: &str, desc: CylinderDesc) -> NodeHandle {
        let frame = self.create_positioned_frame(desc.position);
        let shape = Shape::Cylinder {
            height: desc.height,
            radius: desc.radius,
        };
        self.insert_node(name, frame, shape, desc.color)
    }

    /// Create a letter "H". An empty `name` generates `LetterH_<n>`.
    pub fn create_letter_h(&mut self, name: &str, desc: LetterDesc) -> NodeHandle {
        let frame = self.create_positioned_frame(desc.position);
        let shape = Shape::letter_h(desc.width, desc.height, desc.depth);
        self.insert_node(name, frame, shape, desc.color)
    }

    /// Handle of the node currently registered under `name`
    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    /// Handle of the node at `index` in insertion order
    pub fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        self.order.get(index).copied()
    }

    /// Node by handle
    pub fn node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    /// Node by name
    pub fn get_object(&self, name: &str) -> Option<&SceneNode> {
        self.find(name).and_then(|handle| self.nodes.get(handle))
    }

    /// Node by insertion index
    pub fn get_object_at(&self, index: usize) -> Option<&SceneNode> {
        self.handle_at(index).and_then(|handle| self.nodes.get(handle))
    }

    /// Mutable view of a node by handle
    pub fn object_mut(&mut self, handle: NodeHandle) -> Option<NodeMut<'_>> {
        let frame = self.nodes.get(handle)?.frame();
        Some(NodeMut::new(self, handle, frame))
    }

    /// Mutable view of a node by name
    pub fn get_object_mut(&mut self, name: &str) -> Option<NodeMut<'_>> {
        let handle = self.find(name)?;
        self.object_mut(handle)
    }

    /// Mutable view of a node by insertion index
    pub fn get_object_mut_at(&mut self, index: usize) -> Option<NodeMut<'_>> {
        let handle = self.handle_at(index)?;
        self.object_mut(handle)
    }

    /// Remove a node by handle. Returns `false` if it was not registered.
    pub fn remove(&mut self, handle: NodeHandle) -> bool {
        let Some(node) = self.nodes.remove(handle) else {
            return false;
        };

        self.order.retain(|&entry| entry != handle);
        if self.names.get(node.name()) == Some(&handle) {
            self.names.remove(node.name());
        }
        self.frames.destroy(node.frame());

        log::debug!("removed {} '{}'", node.kind(), node.name());
        true
    }

    /// Remove the node registered under `name`. Unknown names are ignored.
    pub fn remove_object(&mut self, name: &str) -> bool {
        self.find(name).is_some_and(|handle| self.remove(handle))
    }

    /// Remove the node at `index` in insertion order. Out-of-range indices are ignored.
    pub fn remove_object_at(&mut self, index: usize) -> bool {
        self.handle_at(index).is_some_and(|handle| self.remove(handle))
    }

    /// Remove every node
    pub fn clear(&mut self) {
        log::debug!("clearing {} nodes", self.nodes.len());
        self.nodes.clear();
        self.frames.clear();
        self.order.clear();
        self.names.clear();
    }

    /// Translate every node by the same offset
    pub fn translate_all(&mut self, offset: Vec3, space: Space) -> SceneResult<()> {
        for frame in self.frames_in_order() {
            self.frames.translate(frame, offset, space)?;
        }
        Ok(())
    }

    /// Rotate every node by the same delta
    pub fn rotate_all(&mut self, delta: Quat, space: Space) -> SceneResult<()> {
        for frame in self.frames_in_order() {
            self.frames.rotate(frame, delta, space)?;
        }
        Ok(())
    }

    /// Multiply every node's scale by the same factor
    pub fn scale_all(&mut self, factor: Vec3) -> SceneResult<()> {
        for frame in self.frames_in_order() {
            self.frames.scale_by(frame, factor)?;
        }
        Ok(())
    }

    /// Draw every node in insertion order
    pub fn draw_all(&mut self) -> SceneResult<()> {
        for &handle in &self.order {
            if let Some(node) = self.nodes.get(handle) {
                let model = self.frames.world_matrix(node.frame())?;
                node.draw(&model)?;
            }
        }
        Ok(())
    }

    /// Replace the shared renderer on the registry and every node.
    ///
    /// Nodes created later also receive it.
    pub fn set_renderer(&mut self, renderer: Option<SharedRenderer>) {
        for node in self.nodes.values_mut() {
            node.set_renderer(renderer.clone());
        }
        self.renderer = renderer;
    }

    /// Shared renderer
    pub fn renderer(&self) -> Option<&SharedRenderer> {
        self.renderer.as_ref()
    }

    /// Parent `child` under `parent`, or make it a root with `None`
    pub fn set_parent(&mut self, child: NodeHandle, parent: Option<NodeHandle>) -> SceneResult<()> {
        let child_frame = self.frame_of(child)?;
        let parent_frame = parent.map(|parent| self.frame_of(parent)).transpose()?;
        self.frames.set_parent(child_frame, parent_frame)
    }

    /// Attach `child` under `parent`
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> SceneResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Node owning the parent frame of `node`
    pub fn parent_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        let frame = self.nodes.get(node)?.frame();
        self.frames.owner(self.frames.parent(frame)?)
    }

    /// Nodes attached directly under `node`
    pub fn children_of(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.nodes.get(node).map_or_else(Vec::new, |node| {
            self.frames
                .children(node.frame())
                .iter()
                .filter_map(|&child| self.frames.owner(child))
                .collect()
        })
    }

    /// World matrix of a node
    pub fn world_matrix(&mut self, node: NodeHandle) -> SceneResult<Mat4> {
        let frame = self.frame_of(node)?;
        self.frames.world_matrix(frame)
    }

    /// World-space position of a node's origin
    pub fn world_position(&mut self, node: NodeHandle) -> SceneResult<Vec3> {
        let frame = self.frame_of(node)?;
        self.frames.transform_point(frame, Vec3::zeros())
    }

    /// Number of registered nodes
    pub fn object_count(&self) -> usize {
        self.order.len()
    }

    /// True when no nodes are registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &SceneNode)> {
        self.order
            .iter()
            .filter_map(|&handle| self.nodes.get(handle).map(|node| (handle, node)))
    }

    /// Node names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(_, node)| node.name())
    }

    /// Read-only access to the frame hierarchy
    pub fn frames(&self) -> &FrameHierarchy {
        &self.frames
    }

    fn frame_of(&self, node: NodeHandle) -> SceneResult<FrameHandle> {
        self.nodes
            .get(node)
            .map(SceneNode::frame)
            .ok_or(SceneError::InvalidNode(node))
    }

    fn frames_in_order(&self) -> Vec<FrameHandle> {
        self.iter().map(|(_, node)| node.frame()).collect()
    }

    fn create_positioned_frame(&mut self, position: Vec3) -> FrameHandle {
        let frame = self.frames.create();
        if let Err(err) = self.frames.set_position(frame, position) {
            log::error!("failed to position new frame: {err}");
        }
        frame
    }

    fn insert_node(&mut self, name: &str, frame: FrameHandle, shape: Shape, color: Color) -> NodeHandle {
        let kind = shape.kind();
        let name = if name.is_empty() {
            generate_name(kind)
        } else {
            name.to_string()
        };

        let mut node = SceneNode::new(name.clone(), frame, shape, color);
        node.set_renderer(self.renderer.clone());
        let handle = self.nodes.insert(node);
        self.frames.set_owner(frame, Some(handle));
        self.order.push(handle);

        if let Some(previous) = self.names.insert(name.clone(), handle) {
            log::warn!("name '{name}' reassigned; node {previous:?} is no longer reachable by name");
        }
        log::debug!("created {kind} '{name}'");
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{shared, DrawPrimitive, RecordingRenderer};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_generated_names_are_unique() {
        let mut registry = SceneRegistry::default();
        let first = registry.create_cube("", CubeDesc::default());
        let second = registry.create_cube("", CubeDesc::default());

        let first_name = registry.node(first).unwrap().name().to_string();
        let second_name = registry.node(second).unwrap().name().to_string();
        assert_ne!(first_name, second_name);
        assert!(first_name.starts_with("Cube_"));
        assert_eq!(registry.find(&second_name), Some(second));
    }

    #[test]
    fn test_generated_names_survive_removal() {
        let mut registry = SceneRegistry::default();
        let sphere = registry.create_sphere("", SphereDesc::default());
        let removed_name = registry.node(sphere).unwrap().name().to_string();
        assert!(registry.remove(sphere));

        let next = registry.create_sphere("", SphereDesc::default());
        assert_ne!(registry.node(next).unwrap().name(), removed_name);
    }

    #[test]
    fn test_count_tracks_create_and_remove() {
        let mut registry = SceneRegistry::default();
        registry.create_cube("a", CubeDesc::default());
        assert_eq!(registry.object_count(), 1);
        registry.create_cylinder("b", CylinderDesc::default());
        assert_eq!(registry.object_count(), 2);

        assert!(registry.remove_object("a"));
        assert_eq!(registry.object_count(), 1);
        assert!(!registry.remove_object("missing"));
        assert!(!registry.remove_object_at(5));
        assert_eq!(registry.object_count(), 1);
        assert!(registry.get_object("a").is_none());
        assert_eq!(registry.get_object_at(0).unwrap().name(), "b");
    }

    #[test]
    fn test_remove_by_index_keeps_name_index_consistent() {
        let mut registry = SceneRegistry::default();
        registry.create_cube("first", CubeDesc::default());
        registry.create_cube("second", CubeDesc::default());
        registry.create_cube("third", CubeDesc::default());

        assert!(registry.remove_object_at(1));

        assert!(registry.find("second").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "third"]);
        assert_eq!(registry.frames().len(), 2);
    }

    #[test]
    fn test_name_collision_last_writer_wins() {
        let mut registry = SceneRegistry::default();
        let old = registry.create_cube("box", CubeDesc::default());
        let new = registry.create_sphere("box", SphereDesc::default());

        assert_eq!(registry.object_count(), 2);
        assert_eq!(registry.find("box"), Some(new));

        // Removing the displaced node must not drop the newer index entry.
        assert!(registry.remove(old));
        assert_eq!(registry.find("box"), Some(new));
        assert!(registry.remove_object("box"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_descriptor_defaults_applied() {
        let mut registry = SceneRegistry::default();
        let cube = registry.create_cube(
            "cube",
            CubeDesc::default()
                .with_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(Vec3::new(0.0, 30.0, 0.0))
                .with_scale(Vec3::new(2.0, 2.0, 2.0)),
        );
        let sphere = registry.create_sphere("sphere", SphereDesc::default());
        let cylinder = registry.create_cylinder("cylinder", CylinderDesc::default());
        let letter = registry.create_letter_h("letter", LetterDesc::default());

        assert_eq!(registry.node(cube).unwrap().color(), Color::ORANGE);
        assert_eq!(registry.node(sphere).unwrap().radius(), Some(1.0));
        assert_eq!(registry.node(cylinder).unwrap().height(), Some(2.0));
        assert_eq!(registry.node(cylinder).unwrap().radius(), Some(0.5));
        assert_eq!(registry.node(letter).unwrap().color(), Color::RED);

        let view = registry.object_mut(cube).unwrap();
        assert_relative_eq!(view.position(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(view.euler_angles(), Vec3::new(0.0, 30.0, 0.0), epsilon = 1e-3);
        assert_relative_eq!(view.scale(), Vec3::new(2.0, 2.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_renderer_propagation() {
        let (recorder, renderer) = shared(RecordingRenderer::new());
        let mut registry = SceneRegistry::default();
        registry.create_cube("early", CubeDesc::default());
        registry.draw_all().unwrap();
        assert!(recorder.borrow().is_empty());

        registry.set_renderer(Some(renderer));
        registry.create_sphere("late", SphereDesc::default());
        registry.draw_all().unwrap();

        let recorder = recorder.borrow();
        let primitives: Vec<_> = recorder.commands().iter().map(|c| c.primitive).collect();
        assert_eq!(
            primitives,
            vec![DrawPrimitive::Cube, DrawPrimitive::Sphere { radius: 1.0 }]
        );
        assert_eq!(recorder.commands()[0].color, Color::ORANGE);
        assert_eq!(recorder.commands()[1].color, Color::GREEN);
    }

    #[test]
    fn test_unset_renderer_stops_drawing() {
        let (recorder, renderer) = shared(RecordingRenderer::new());
        let mut registry = SceneRegistry::new(Some(renderer));
        registry.create_cube("", CubeDesc::default());

        registry.set_renderer(None);
        registry.draw_all().unwrap();
        assert!(recorder.borrow().is_empty());
        assert!(registry.renderer().is_none());
    }

    #[test]
    fn test_parent_of_is_real() {
        let mut registry = SceneRegistry::default();
        let parent = registry.create_cube("parent", CubeDesc::default());
        let child = registry.create_sphere("child", SphereDesc::default());

        assert_eq!(registry.parent_of(child), None);
        registry.set_parent(child, Some(parent)).unwrap();
        assert_eq!(registry.parent_of(child), Some(parent));
        assert_eq!(registry.children_of(parent), vec![child]);

        registry.set_parent(child, None).unwrap();
        assert_eq!(registry.parent_of(child), None);
        assert!(registry.children_of(parent).is_empty());
    }

    #[test]
    fn test_node_cycles_are_rejected() {
        let mut registry = SceneRegistry::default();
        let a = registry.create_cube("a", CubeDesc::default());
        let b = registry.create_cube("b", CubeDesc::default());
        registry.add_child(a, b).unwrap();

        assert!(matches!(
            registry.set_parent(a, Some(b)),
            Err(SceneError::CycleDetected { .. })
        ));
        assert_eq!(registry.parent_of(a), None);
    }

    #[test]
    fn test_removing_parent_orphans_child_node() {
        let mut registry = SceneRegistry::default();
        let parent = registry.create_cube("parent", CubeDesc::default().with_position(Vec3::new(4.0, 0.0, 0.0)));
        let child = registry.create_sphere("child", SphereDesc::default().with_position(Vec3::new(1.0, 0.0, 0.0)));
        registry.add_child(parent, child).unwrap();
        assert_relative_eq!(registry.world_position(child).unwrap(), Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);

        assert!(registry.remove(parent));

        assert_eq!(registry.parent_of(child), None);
        assert_relative_eq!(registry.world_position(child).unwrap(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(registry.set_parent(child, Some(parent)), Err(SceneError::InvalidNode(parent)));
    }

    #[test]
    fn test_batch_transforms_apply_to_every_node() {
        let mut registry = SceneRegistry::default();
        let parent = registry.create_cube("parent", CubeDesc::default());
        let child = registry.create_cube("child", CubeDesc::default().with_position(Vec3::new(1.0, 0.0, 0.0)));
        registry.add_child(parent, child).unwrap();

        registry.translate_all(Vec3::new(0.0, 2.0, 0.0), Space::World).unwrap();

        // The child moves by its own offset plus the inherited one.
        assert_relative_eq!(registry.world_position(parent).unwrap(), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(registry.world_position(child).unwrap(), Vec3::new(1.0, 4.0, 0.0), epsilon = EPSILON);

        registry.scale_all(Vec3::new(2.0, 2.0, 2.0)).unwrap();
        let child_scale = registry.object_mut(child).unwrap().scale();
        assert_relative_eq!(child_scale, Vec3::new(2.0, 2.0, 2.0), epsilon = EPSILON);

        registry
            .rotate_all(utils::quat_from_axis_angle_degrees(Vec3::y(), 90.0), Space::Local)
            .unwrap();
        let rotation = registry.object_mut(parent).unwrap().rotation();
        assert_relative_eq!(rotation.angle(), 90.0_f32.to_radians(), epsilon = EPSILON);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut registry = SceneRegistry::default();
        let cube = registry.create_cube("", CubeDesc::default());
        registry.create_letter_h("", LetterDesc::default());

        registry.clear();

        assert_eq!(registry.object_count(), 0);
        assert!(registry.frames().is_empty());
        assert!(registry.node(cube).is_none());
        assert!(registry.object_mut(cube).is_none());
    }

    #[test]
    fn test_lookup_misses_return_none() {
        let mut registry = SceneRegistry::default();
        assert!(registry.get_object("nothing").is_none());
        assert!(registry.get_object_at(0).is_none());
        assert!(registry.get_object_mut("nothing").is_none());
        assert!(registry.get_object_mut_at(3).is_none());
    }
}
