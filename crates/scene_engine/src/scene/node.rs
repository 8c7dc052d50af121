//! Scene nodes
//!
//! A [`SceneNode`] pairs one spatial frame with a drawable [`Shape`] and a
//! color. Nodes are owned by a [`SceneRegistry`]; [`NodeMut`] is the mutable
//! view through which their transforms and parenting are changed.

use std::fmt;

use crate::foundation::collections::{FrameHandle, NodeHandle};
use crate::foundation::math::{Mat4, Quat, Vec3};
use crate::render::{Color, CompositeMesh, SharedRenderer};

use super::error::{SceneError, SceneResult};
use super::frame::{Space, SpatialFrame};
use super::registry::SceneRegistry;

/// Kind of primitive a node draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Unit cube
    Cube,
    /// Sphere
    Sphere,
    /// Capped cylinder
    Cylinder,
    /// Letter "H" built from cylinders
    LetterH,
}

impl ShapeKind {
    /// Prefix used for generated node names
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Cylinder => "Cylinder",
            Self::LetterH => "LetterH",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Shape-specific geometry of a node
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Unit cube, sized through the frame's scale
    Cube,
    /// Sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Y-aligned capped cylinder
    Cylinder {
        /// Cylinder height
        height: f32,
        /// Cylinder radius
        radius: f32,
    },
    /// Letter "H" with its prebuilt mesh
    LetterH {
        /// Letter width
        width: f32,
        /// Letter height
        height: f32,
        /// Letter depth
        depth: f32,
        /// Generated geometry
        mesh: CompositeMesh,
    },
}

impl Shape {
    /// Letter "H" with freshly generated geometry
    pub fn letter_h(width: f32, height: f32, depth: f32) -> Self {
        Self::LetterH {
            width,
            height,
            depth,
            mesh: CompositeMesh::letter_h(width, height, depth),
        }
    }

    /// Kind of this shape
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Cube => ShapeKind::Cube,
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Cylinder { .. } => ShapeKind::Cylinder,
            Self::LetterH { .. } => ShapeKind::LetterH,
        }
    }
}

/// Drawable object with a frame in the hierarchy
pub struct SceneNode {
    name: String,
    frame: FrameHandle,
    shape: Shape,
    color: Color,
    renderer: Option<SharedRenderer>,
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("frame", &self.frame)
            .field("shape", &self.shape.kind())
            .field("color", &self.color)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl SceneNode {
    pub(crate) fn new(name: String, frame: FrameHandle, shape: Shape, color: Color) -> Self {
        Self {
            name,
            frame,
            shape,
            color,
            renderer: None,
        }
    }

    /// Registry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frame carrying this node's transform
    pub fn frame(&self) -> FrameHandle {
        self.frame
    }

    /// Geometry description
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Shape kind
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color used by the next draw
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Renderer used by [`SceneNode::draw`]
    pub fn renderer(&self) -> Option<&SharedRenderer> {
        self.renderer.as_ref()
    }

    /// Replace the renderer; `None` turns drawing into a no-op
    pub fn set_renderer(&mut self, renderer: Option<SharedRenderer>) {
        self.renderer = renderer;
    }

    /// Radius of a sphere or cylinder
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } | Shape::Cylinder { radius, .. } => Some(radius),
            _ => None,
        }
    }

    /// Set the radius of a sphere or cylinder. Returns `false` for other shapes.
    pub fn set_radius(&mut self, value: f32) -> bool {
        match &mut self.shape {
            Shape::Sphere { radius } | Shape::Cylinder { radius, .. } => {
                *radius = value;
                true
            }
            _ => false,
        }
    }

    /// Height of a cylinder or letter
    pub fn height(&self) -> Option<f32> {
        match self.shape {
            Shape::Cylinder { height, .. } | Shape::LetterH { height, .. } => Some(height),
            _ => None,
        }
    }

    /// Set the height of a cylinder. Returns `false` for other shapes.
    pub fn set_height(&mut self, value: f32) -> bool {
        if let Shape::Cylinder { height, .. } = &mut self.shape {
            *height = value;
            return true;
        }
        false
    }

    /// Rebuild a letter with new dimensions. Returns `false` for other shapes.
    pub fn set_letter_dimensions(&mut self, width: f32, height: f32, depth: f32) -> bool {
        if matches!(self.shape, Shape::LetterH { .. }) {
            self.shape = Shape::letter_h(width, height, depth);
            return true;
        }
        false
    }

    /// Issue the renderer calls for this node with the given world matrix
    pub fn draw(&self, model: &Mat4) -> SceneResult<()> {
        let Some(renderer) = &self.renderer else {
            return Ok(());
        };
        let mut renderer = renderer
            .try_borrow_mut()
            .map_err(|err| SceneError::RendererBusy(err.to_string()))?;

        renderer.set_color(self.color);
        match &self.shape {
            Shape::Cube => renderer.draw_cube(model),
            Shape::Sphere { radius } => renderer.draw_sphere(model, *radius),
            Shape::Cylinder { height, radius } => renderer.draw_cylinder(model, *height, *radius),
            Shape::LetterH { mesh, .. } => renderer.draw_mesh(model, mesh),
        }
        Ok(())
    }
}

/// Mutable view of one node inside its registry.
///
/// Transform calls are forwarded to the node's frame, so dirty propagation
/// through the hierarchy is preserved.
pub struct NodeMut<'a> {
    registry: &'a mut SceneRegistry,
    handle: NodeHandle,
    frame: FrameHandle,
}

impl<'a> NodeMut<'a> {
    pub(super) fn new(registry: &'a mut SceneRegistry, handle: NodeHandle, frame: FrameHandle) -> Self {
        Self {
            registry,
            handle,
            frame,
        }
    }

    /// Handle of the viewed node
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// The node itself
    pub fn node(&self) -> &SceneNode {
        &self.registry.nodes[self.handle]
    }

    /// The node itself, mutably
    pub fn node_mut(&mut self) -> &mut SceneNode {
        &mut self.registry.nodes[self.handle]
    }

    /// The node's frame
    pub fn spatial(&self) -> &SpatialFrame {
        &self.registry.frames[self.frame]
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.spatial().position()
    }

    /// Rotation relative to the parent
    pub fn rotation(&self) -> Quat {
        self.spatial().rotation()
    }

    /// Rotation as Euler angles in degrees
    pub fn euler_angles(&self) -> Vec3 {
        self.spatial().euler_angles()
    }

    /// Component-wise scale
    pub fn scale(&self) -> Vec3 {
        self.spatial().scale()
    }

    /// Overwrite the position
    pub fn set_position(&mut self, position: Vec3) -> SceneResult<()> {
        self.registry.frames.set_position(self.frame, position)
    }

    /// Overwrite the rotation (renormalized)
    pub fn set_rotation(&mut self, rotation: Quat) -> SceneResult<()> {
        self.registry.frames.set_rotation(self.frame, rotation)
    }

    /// Overwrite the rotation from Euler angles in degrees
    pub fn set_rotation_euler(&mut self, degrees: Vec3) -> SceneResult<()> {
        self.registry.frames.set_rotation_euler(self.frame, degrees)
    }

    /// Overwrite the scale
    pub fn set_scale(&mut self, scale: Vec3) -> SceneResult<()> {
        self.registry.frames.set_scale(self.frame, scale)
    }

    /// Move by `offset` in the given space
    pub fn translate(&mut self, offset: Vec3, space: Space) -> SceneResult<()> {
        self.registry.frames.translate(self.frame, offset, space)
    }

    /// Compose a rotation in the given space
    pub fn rotate(&mut self, delta: Quat, space: Space) -> SceneResult<()> {
        self.registry.frames.rotate(self.frame, delta, space)
    }

    /// Rotate by `degrees` about `axis` in the given space
    pub fn rotate_axis_angle(&mut self, axis: Vec3, degrees: f32, space: Space) -> SceneResult<()> {
        self.registry
            .frames
            .rotate_axis_angle(self.frame, axis, degrees, space)
    }

    /// Multiply the scale component-wise
    pub fn scale_by(&mut self, factor: Vec3) -> SceneResult<()> {
        self.registry.frames.scale_by(self.frame, factor)
    }

    /// Restore identity position, rotation and scale
    pub fn reset(&mut self) -> SceneResult<()> {
        self.registry.frames.reset(self.frame)
    }

    /// World matrix consumed by the renderer
    pub fn model_matrix(&mut self) -> SceneResult<Mat4> {
        self.registry.frames.world_matrix(self.frame)
    }

    /// Parent this node under another node, or make it a root with `None`
    pub fn set_parent(&mut self, parent: Option<NodeHandle>) -> SceneResult<()> {
        self.registry.set_parent(self.handle, parent)
    }

    /// Node owning the parent frame
    pub fn parent(&self) -> Option<NodeHandle> {
        self.registry.parent_of(self.handle)
    }

    /// Attach another node under this one
    pub fn add_child(&mut self, child: NodeHandle) -> SceneResult<()> {
        self.registry.set_parent(child, Some(self.handle))
    }

    /// Nodes attached under this one
    pub fn children(&self) -> Vec<NodeHandle> {
        self.registry.children_of(self.handle)
    }

    /// Current color
    pub fn color(&self) -> Color {
        self.node().color()
    }

    /// Change the color
    pub fn set_color(&mut self, color: Color) {
        self.node_mut().set_color(color);
    }

    /// Replace this node's renderer
    pub fn set_renderer(&mut self, renderer: Option<SharedRenderer>) {
        self.node_mut().set_renderer(renderer);
    }

    /// Draw the node with its current world matrix
    pub fn draw(&mut self) -> SceneResult<()> {
        let model = self.model_matrix()?;
        self.node().draw(&model)
    }
}
