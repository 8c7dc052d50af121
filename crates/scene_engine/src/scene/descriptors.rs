//! Creation parameters for registry primitives
//!
//! Each descriptor defaults to the stock look of its primitive and can be
//! seeded from a loaded [`PrimitiveDefaults`] instead.

use crate::core::config::PrimitiveDefaults;
use crate::foundation::math::Vec3;
use crate::render::Color;

/// Parameters for [`SceneRegistry::create_cube`](super::SceneRegistry::create_cube)
#[derive(Debug, Clone, PartialEq)]
pub struct CubeDesc {
    /// Initial position
    pub position: Vec3,
    /// Initial rotation as Euler angles in degrees
    pub rotation: Vec3,
    /// Initial scale
    pub scale: Vec3,
    /// Color
    pub color: Color,
}

impl CubeDesc {
    /// Seed from configured defaults
    pub fn from_defaults(defaults: &PrimitiveDefaults) -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            color: defaults.cube_color,
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation in Euler degrees
    pub fn with_rotation(mut self, degrees: Vec3) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for CubeDesc {
    fn default() -> Self {
        Self::from_defaults(&PrimitiveDefaults::default())
    }
}

/// Parameters for [`SceneRegistry::create_sphere`](super::SceneRegistry::create_sphere)
#[derive(Debug, Clone, PartialEq)]
pub struct SphereDesc {
    /// Initial position
    pub position: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// Color
    pub color: Color,
}

impl SphereDesc {
    /// Seed from configured defaults
    pub fn from_defaults(defaults: &PrimitiveDefaults) -> Self {
        Self {
            position: Vec3::zeros(),
            radius: defaults.sphere_radius,
            color: defaults.sphere_color,
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for SphereDesc {
    fn default() -> Self {
        Self::from_defaults(&PrimitiveDefaults::default())
    }
}

/// Parameters for [`SceneRegistry::create_cylinder`](super::SceneRegistry::create_cylinder)
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderDesc {
    /// Initial position
    pub position: Vec3,
    /// Cylinder height
    pub height: f32,
    /// Cylinder radius
    pub radius: f32,
    /// Color
    pub color: Color,
}

impl CylinderDesc {
    /// Seed from configured defaults
    pub fn from_defaults(defaults: &PrimitiveDefaults) -> Self {
        Self {
            position: Vec3::zeros(),
            height: defaults.cylinder_height,
            radius: defaults.cylinder_radius,
            color: defaults.cylinder_color,
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set height and radius
    pub fn with_dimensions(mut self, height: f32, radius: f32) -> Self {
        self.height = height;
        self.radius = radius;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for CylinderDesc {
    fn default() -> Self {
        Self::from_defaults(&PrimitiveDefaults::default())
    }
}

/// Parameters for [`SceneRegistry::create_letter_h`](super::SceneRegistry::create_letter_h)
#[derive(Debug, Clone, PartialEq)]
pub struct LetterDesc {
    /// Initial position
    pub position: Vec3,
    /// Letter width
    pub width: f32,
    /// Letter height
    pub height: f32,
    /// Letter depth
    pub depth: f32,
    /// Color
    pub color: Color,
}

impl LetterDesc {
    /// Seed from configured defaults
    pub fn from_defaults(defaults: &PrimitiveDefaults) -> Self {
        Self {
            position: Vec3::zeros(),
            width: defaults.letter_width,
            height: defaults.letter_height,
            depth: defaults.letter_depth,
            color: defaults.letter_color,
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set width, height and depth
    pub fn with_dimensions(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.width = width;
        self.height = height;
        self.depth = depth;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for LetterDesc {
    fn default() -> Self {
        Self::from_defaults(&PrimitiveDefaults::default())
    }
}
