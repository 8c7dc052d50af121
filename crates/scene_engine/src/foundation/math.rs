//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of angle and composition
//! helpers the scene graph needs. Angles crossing the public API are in
//! degrees; everything stored internally is in radians.

pub use nalgebra::{Matrix4, Quaternion, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Quat, Unit, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a rotation from Euler angles in degrees.
    ///
    /// Components are angles about X, Y and Z. X is applied first, then Y,
    /// then Z.
    pub fn quat_from_euler_degrees(degrees: Vec3) -> Quat {
        Quat::from_euler_angles(
            deg_to_rad(degrees.x),
            deg_to_rad(degrees.y),
            deg_to_rad(degrees.z),
        )
    }

    /// Inverse of [`quat_from_euler_degrees`]
    pub fn euler_degrees_from_quat(rotation: &Quat) -> Vec3 {
        let (x, y, z) = rotation.euler_angles();
        Vec3::new(rad_to_deg(x), rad_to_deg(y), rad_to_deg(z))
    }

    /// Rotation of `degrees` about `axis`. The axis does not need to be unit length.
    pub fn quat_from_axis_angle_degrees(axis: Vec3, degrees: f32) -> Quat {
        Quat::from_axis_angle(&Unit::new_normalize(axis), deg_to_rad(degrees))
    }

    /// Compose translation, rotation and scale as `T * R * S`
    pub fn compose_trs(position: &Vec3, rotation: &Quat, scale: &Vec3) -> Mat4 {
        Mat4::new_translation(position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(scale)
    }

    /// True when any scale component is zero or not finite
    pub fn is_degenerate_scale(scale: &Vec3) -> bool {
        scale
            .iter()
            .any(|c| !c.is_finite() || approx::abs_diff_eq!(*c, 0.0, epsilon = f32::EPSILON))
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_degree_conversions() {
        assert_relative_eq!(deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
        assert_relative_eq!(rad_to_deg(constants::HALF_PI), 90.0, epsilon = EPSILON);
    }

    #[test]
    fn test_euler_single_axis_matches_axis_angle() {
        let from_euler = quat_from_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        let from_axis = quat_from_axis_angle_degrees(Vec3::y(), 90.0);
        assert_relative_eq!(from_euler, from_axis, epsilon = EPSILON);
    }

    #[test]
    fn test_euler_round_trip() {
        let degrees = Vec3::new(10.0, 20.0, 30.0);
        let rotation = quat_from_euler_degrees(degrees);
        assert_relative_eq!(euler_degrees_from_quat(&rotation), degrees, epsilon = 1e-3);
    }

    #[test]
    fn test_axis_angle_normalizes_axis() {
        let rotation = quat_from_axis_angle_degrees(Vec3::new(0.0, 0.0, 5.0), 90.0);
        assert_relative_eq!(rotation * Vec3::x(), Vec3::y(), epsilon = EPSILON);
    }

    #[test]
    fn test_compose_trs_order() {
        let position = Vec3::new(1.0, 0.0, 0.0);
        let rotation = quat_from_axis_angle_degrees(Vec3::y(), 90.0);
        let scale = Vec3::new(2.0, 1.0, 1.0);
        let matrix = compose_trs(&position, &rotation, &scale);

        let local = Point3::new(1.0, 0.0, 0.0);
        let expected = position + rotation * scale.component_mul(&local.coords);
        assert_relative_eq!(matrix.transform_point(&local).coords, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_scale_detection() {
        assert!(is_degenerate_scale(&Vec3::new(1.0, 0.0, 1.0)));
        assert!(is_degenerate_scale(&Vec3::new(f32::NAN, 1.0, 1.0)));
        assert!(!is_degenerate_scale(&Vec3::new(1.0, -2.0, 0.5)));
    }
}
