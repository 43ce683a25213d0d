/// Assembly orientation matrices
use nalgebra::{Matrix4, Vector3};

/// Matrix builders for orienting the fan head.
///
/// Spin lives in the blade generator; these handle the slower whole-head
/// rotations (tilt about the mount, oscillation yaw).
pub struct Assembly;

impl Assembly {
    /// Yaw rotation about the vertical z-axis (oscillation sweep)
    pub fn yaw_matrix(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, radians))
    }

    /// Pitch rotation about the horizontal x-axis (head tilt)
    pub fn tilt_matrix(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(radians, 0.0, 0.0))
    }

    /// Full head orientation: tilt first, then the oscillation yaw
    pub fn orientation(tilt_radians: f32, yaw_radians: f32) -> Matrix4<f32> {
        Self::yaw_matrix(yaw_radians) * Self::tilt_matrix(tilt_radians)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_zero_angles_are_identity() {
        let matrix = Assembly::orientation(0.0, 0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let matrix = Assembly::yaw_matrix(FRAC_PI_2);
        let moved = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((moved - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_tilt_leaves_x_axis_fixed() {
        let matrix = Assembly::tilt_matrix(0.7);
        let moved = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((moved - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-6);
    }
}
