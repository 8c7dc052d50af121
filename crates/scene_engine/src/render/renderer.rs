//! Renderer collaborator interface
//!
//! Scene nodes never issue draw calls themselves. They hand their world matrix
//! and color to a [`GeometryRenderer`], which owns shaders, buffers and the
//! primitive meshes.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Mat4;
use crate::render::{Color, CompositeMesh};

/// Draws primitive shapes with a model matrix and the current color
pub trait GeometryRenderer {
    /// Set the color used by subsequent draw calls
    fn set_color(&mut self, color: Color);

    /// Draw a unit cube transformed by `model`
    fn draw_cube(&mut self, model: &Mat4);

    /// Draw a sphere of `radius` transformed by `model`
    fn draw_sphere(&mut self, model: &Mat4, radius: f32);

    /// Draw a Y-aligned cylinder transformed by `model`
    fn draw_cylinder(&mut self, model: &Mat4, height: f32, radius: f32);

    /// Draw prebuilt composite geometry transformed by `model`
    fn draw_mesh(&mut self, model: &Mat4, mesh: &CompositeMesh);
}

/// Renderer shared by every node of a registry.
///
/// Single-threaded: nodes keep a clone of the `Rc` and borrow it for the
/// duration of one draw call.
pub type SharedRenderer = Rc<RefCell<dyn GeometryRenderer>>;

/// Wrap a renderer so it can be handed to a registry while the caller keeps
/// typed access to it.
pub fn shared<R: GeometryRenderer + 'static>(renderer: R) -> (Rc<RefCell<R>>, SharedRenderer) {
    let typed = Rc::new(RefCell::new(renderer));
    let erased: SharedRenderer = typed.clone();
    (typed, erased)
}
