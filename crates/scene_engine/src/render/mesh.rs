//! Composite meshes built from procedural parts
//!
//! The scene core treats a [`CompositeMesh`] as opaque vertex and index data
//! that the renderer draws with the owning node's world matrix. The only
//! composite currently generated is the capital letter "H" made of three
//! capped cylinders.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{constants, utils, Mat4, Point3, Vec3};

/// Sectors used for every cylinder in a composite
const CYLINDER_SECTORS: u32 = 12;

/// Stroke width of the letter as a fraction of its width
const STROKE_RATIO: f32 = 0.2;

/// Crossbar length as a fraction of the letter width
const CROSSBAR_RATIO: f32 = 0.7;

/// Vertex with position, normal, and texture coordinate data.
///
/// `#[repr(C)]` and `Pod` so a slice of vertices can be uploaded as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in mesh space
    pub position: [f32; 3],

    /// Unit normal
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Indexed triangle mesh assembled from several primitive parts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompositeMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl CompositeMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the letter "H" from three cylinders.
    ///
    /// Two uprights of `height` sit at the left and right edges, joined by a
    /// horizontal crossbar through the origin. `depth` is accepted for parity
    /// with the other dimensions but the strokes are round, so it does not
    /// change the geometry.
    pub fn letter_h(width: f32, height: f32, depth: f32) -> Self {
        let stroke_width = width * STROKE_RATIO;
        let half_width = width / 2.0;
        let radius = stroke_width / 2.0;

        log::trace!("building letter H {width}x{height}x{depth}, stroke radius {radius}");

        let mut mesh = Self::new();
        mesh.add_cylinder(Vec3::new(-half_width + radius, 0.0, 0.0), height, radius, 0.0);
        mesh.add_cylinder(Vec3::zeros(), width * CROSSBAR_RATIO, radius, 90.0);
        mesh.add_cylinder(Vec3::new(half_width - radius, 0.0, 0.0), height, radius, 0.0);
        mesh
    }

    /// Append a capped cylinder.
    ///
    /// The unit cylinder spans `y` in `[-0.5, 0.5]` with radius 1 and is
    /// placed with `T * Rz * S(radius, height, radius)`. Normals are rotated
    /// but not scaled.
    pub fn add_cylinder(&mut self, position: Vec3, height: f32, radius: f32, z_rotation_degrees: f32) {
        let sectors = CYLINDER_SECTORS;
        let base = self.vertex_count_u32();
        let sector_step = 2.0 * constants::PI / sectors as f32;

        let rotation = utils::quat_from_axis_angle_degrees(Vec3::z(), z_rotation_degrees);
        let transform = Mat4::new_translation(&position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&Vec3::new(radius, height, radius));

        let mut push = |local: Vec3, normal: Vec3, tex_coord: [f32; 2]| {
            let world = transform.transform_point(&Point3::from(local));
            let normal = (rotation * normal).normalize();
            self.vertices
                .push(Vertex::new(world.coords.into(), normal.into(), tex_coord));
        };

        push(Vec3::new(0.0, 0.5, 0.0), Vec3::y(), [0.5, 0.5]);
        push(Vec3::new(0.0, -0.5, 0.0), -Vec3::y(), [0.5, 0.5]);

        for i in 0..=sectors {
            let angle = i as f32 * sector_step;
            let (z, x) = angle.sin_cos();
            let side_normal = Vec3::new(x, 0.0, z).normalize();
            let cap_uv = [x * 0.5 + 0.5, z * 0.5 + 0.5];
            let u = i as f32 / sectors as f32;

            push(Vec3::new(x, 0.5, z), Vec3::y(), cap_uv);
            push(Vec3::new(x, -0.5, z), -Vec3::y(), cap_uv);
            push(Vec3::new(x, 0.5, z), side_normal, [u, 1.0]);
            push(Vec3::new(x, -0.5, z), side_normal, [u, 0.0]);
        }

        // Ring vertex i starts at base + 2 + 4i: top cap, bottom cap, side top, side bottom.
        let ring = |i: u32| base + 2 + i * 4;

        for i in 0..sectors {
            self.indices.extend_from_slice(&[base, ring(i + 1), ring(i)]);
        }
        for i in 0..sectors {
            self.indices
                .extend_from_slice(&[base + 1, ring(i) + 1, ring(i + 1) + 1]);
        }
        for i in 0..sectors {
            let (current, next) = (ring(i), ring(i + 1));
            self.indices.extend_from_slice(&[
                current + 2,
                next + 2,
                current + 3,
                current + 3,
                next + 2,
                next + 3,
            ]);
        }
    }

    /// Vertex data
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangle index data
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh holds no geometry
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex data as raw bytes for a buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for a buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn vertex_count_u32(&self) -> u32 {
        u32::try_from(self.vertices.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_single_cylinder_counts() {
        let mut mesh = CompositeMesh::new();
        mesh.add_cylinder(Vec3::zeros(), 2.0, 0.5, 0.0);

        // Two cap centers plus four vertices per ring position (sectors + 1 positions).
        assert_eq!(mesh.vertex_count(), 2 + 4 * 13);
        // Top fan, bottom fan and two triangles per side quad.
        assert_eq!(mesh.triangle_count(), 12 * 4);
    }

    #[test]
    fn test_letter_h_counts() {
        let mesh = CompositeMesh::letter_h(2.0, 3.0, 0.5);
        assert_eq!(mesh.vertex_count(), 3 * 54);
        assert_eq!(mesh.triangle_count(), 3 * 48);
        assert!(mesh
            .indices()
            .iter()
            .all(|&index| (index as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_letter_h_layout() {
        let mesh = CompositeMesh::letter_h(2.0, 3.0, 0.5);
        let radius = 0.2;

        // First vertex is the top center of the left upright.
        let top_left = mesh.vertices()[0].position;
        assert_relative_eq!(top_left[0], -1.0 + radius, epsilon = EPSILON);
        assert_relative_eq!(top_left[1], 1.5, epsilon = EPSILON);

        // The crossbar is rotated onto the X axis, so its top cap points along -X.
        let crossbar_top = mesh.vertices()[54];
        assert_relative_eq!(crossbar_top.position[0], -0.7, epsilon = EPSILON);
        assert_relative_eq!(crossbar_top.position[1], 0.0, epsilon = EPSILON);
        assert_relative_eq!(crossbar_top.normal[0], -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mesh = CompositeMesh::letter_h(4.0, 1.0, 1.0);
        for vertex in mesh.vertices() {
            let normal = Vec3::from(vertex.normal);
            assert_relative_eq!(normal.norm(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_byte_views() {
        let mesh = CompositeMesh::letter_h(2.0, 3.0, 0.5);
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * 32);
        assert_eq!(mesh.index_bytes().len(), mesh.indices().len() * 4);
        assert!(CompositeMesh::new().is_empty());
    }
}
