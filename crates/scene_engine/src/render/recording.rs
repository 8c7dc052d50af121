//! Headless renderer that records draw calls
//!
//! Useful wherever there is no graphics context: tests, tools, and the demo
//! binary's dry runs.

use crate::foundation::math::Mat4;
use crate::render::{Color, CompositeMesh, GeometryRenderer};

/// Primitive requested by a draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPrimitive {
    /// Unit cube
    Cube,
    /// Sphere with its radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Cylinder with its dimensions
    Cylinder {
        /// Cylinder height
        height: f32,
        /// Cylinder radius
        radius: f32,
    },
    /// Composite mesh with its size
    Mesh {
        /// Vertices in the mesh
        vertex_count: usize,
        /// Triangles in the mesh
        triangle_count: usize,
    },
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// What was drawn
    pub primitive: DrawPrimitive,
    /// Color active at the time of the call
    pub color: Color,
    /// World transform matrix
    pub model: Mat4,
}

/// [`GeometryRenderer`] that stores every call in order
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    color: Color,
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing has been drawn
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the recorded commands, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn record(&mut self, primitive: DrawPrimitive, model: &Mat4) {
        log::trace!("recorded {primitive:?} with color {:?}", self.color);
        self.commands.push(DrawCommand {
            primitive,
            color: self.color,
            model: *model,
        });
    }
}

impl GeometryRenderer for RecordingRenderer {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_cube(&mut self, model: &Mat4) {
        self.record(DrawPrimitive::Cube, model);
    }

    fn draw_sphere(&mut self, model: &Mat4, radius: f32) {
        self.record(DrawPrimitive::Sphere { radius }, model);
    }

    fn draw_cylinder(&mut self, model: &Mat4, height: f32, radius: f32) {
        self.record(DrawPrimitive::Cylinder { height, radius }, model);
    }

    fn draw_mesh(&mut self, model: &Mat4, mesh: &CompositeMesh) {
        self.record(
            DrawPrimitive::Mesh {
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
            },
            model,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_records_color_and_model() {
        let mut renderer = RecordingRenderer::new();
        let model = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));

        renderer.set_color(Color::GREEN);
        renderer.draw_sphere(&model, 0.5);
        renderer.set_color(Color::BLUE);
        renderer.draw_cube(&Mat4::identity());

        let commands = renderer.commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].primitive, DrawPrimitive::Sphere { radius: 0.5 });
        assert_eq!(commands[0].color, Color::GREEN);
        assert_eq!(commands[0].model, model);
        assert_eq!(commands[1].color, Color::BLUE);
    }

    #[test]
    fn test_drain_empties_recorder() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw_mesh(&Mat4::identity(), &CompositeMesh::letter_h(2.0, 3.0, 0.5));

        let drained = renderer.drain();
        assert_eq!(
            drained[0].primitive,
            DrawPrimitive::Mesh {
                vertex_count: 162,
                triangle_count: 144
            }
        );
        assert!(renderer.is_empty());
    }
}
