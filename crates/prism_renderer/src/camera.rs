//! Camera for primary ray generation.
//!
//! Pixel coordinates go through normalized device coordinates, screen
//! space and camera space before the inverse look-at transform takes the
//! direction to world space. Row 0 is the bottom scanline, the OpenGL
//! convention of the presentation layer.

use crate::{RenderError, RenderResult};
use prism_core::CameraDescription;
use prism_math::{Mat4, Point3, Quat, Ray, Vec3};
use std::f32::consts::PI;

/// Distance covered by one translation step, in world units.
pub const MOVE_SPEED: f32 = 0.5;

/// Angle covered by one rotation step (5 degrees), in radians.
pub const ROTATE_SPEED: f32 = PI / 36.0;

/// Discrete camera movements issued by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    RotateLeft,
    RotateRight,
}

/// A pinhole camera with a look-at orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    /// Unit viewing direction; the target is `position + front`
    front: Vec3,
    up: Vec3,
    /// Vertical field of view in radians
    fov: f32,
    width: u32,
    height: u32,
}

impl Camera {
    /// Create a camera at `position` looking at `target` with a 90° field of view.
    pub fn new(position: Point3, target: Point3, width: u32, height: u32) -> Self {
        Self {
            position,
            front: (target - position).normalize_or_zero(),
            up: Vec3::Y,
            fov: PI / 2.0,
            width,
            height,
        }
    }

    /// Set the vertical field of view in radians.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set the world up vector.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up.normalize_or_zero();
        self
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// The point one unit ahead of the camera along its viewing direction.
    pub fn target(&self) -> Point3 {
        self.position + self.front
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Check that the camera can generate finite rays.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::ZeroResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(RenderError::InvalidFov(self.fov));
        }
        if self.front.cross(self.up).length_squared() < 1e-12 {
            return Err(RenderError::DegenerateView);
        }
        Ok(())
    }

    /// Change the output raster (viewport resize).
    pub fn set_resolution(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroResolution { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// World to camera transform, recomputed from the current pose.
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.up)
    }

    /// Generate the primary ray through the center of pixel (row, col).
    pub fn emit_ray(&self, row: u32, col: u32) -> Ray {
        // Normalized device coordinates
        let ndc_x = (col as f32 + 0.5) / self.width as f32;
        let ndc_y = (row as f32 + 0.5) / self.height as f32;

        // Screen space, [-1, 1]
        let screen_x = 2.0 * ndc_x - 1.0;
        let screen_y = 2.0 * ndc_y - 1.0;

        // Camera space, looking down -Z
        let scale = (self.fov / 2.0).tan();
        let camera_dir = Vec3::new(screen_x * self.aspect_ratio() * scale, screen_y * scale, -1.0);

        let direction = self.view().inverse().transform_vector3(camera_dir);
        Ray::new(self.position, direction)
    }

    /// Apply one fixed-size movement step along the camera's local axes.
    pub fn step(&mut self, direction: Direction) {
        let right = self.front.cross(self.up).normalize_or_zero();

        match direction {
            Direction::Forward => self.position += self.front * MOVE_SPEED,
            Direction::Backward => self.position -= self.front * MOVE_SPEED,
            Direction::Left => self.position -= right * MOVE_SPEED,
            Direction::Right => self.position += right * MOVE_SPEED,
            Direction::RotateLeft => self.rotate(ROTATE_SPEED),
            Direction::RotateRight => self.rotate(-ROTATE_SPEED),
        }
    }

    /// Yaw the viewing direction around the up axis.
    fn rotate(&mut self, angle: f32) {
        self.front = (Quat::from_axis_angle(self.up, angle) * self.front).normalize();
    }
}

impl From<&CameraDescription> for Camera {
    fn from(desc: &CameraDescription) -> Self {
        Camera::new(desc.position, desc.target, desc.width, desc.height)
            .with_fov(desc.fov_degrees.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 200, 200)
    }

    #[test]
    fn test_camera_creation() {
        let camera = camera();

        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(camera.front(), -Vec3::Z);
        assert_eq!(camera.aspect_ratio(), 1.0);
        assert!((camera.fov() - PI / 2.0).abs() < 1e-6);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_center_ray_looks_at_target() {
        // Odd raster so a pixel center sits exactly on the optical axis.
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 201, 201);
        let ray = camera.emit_ray(100, 100);

        assert_eq!(ray.origin(), camera.position());
        assert!((ray.direction() - -Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_ray_orientation() {
        let camera = camera();

        // Row 0 is the bottom scanline, column 0 the left edge.
        let bottom_left = camera.emit_ray(0, 0).direction();
        assert!(bottom_left.x < 0.0 && bottom_left.y < 0.0 && bottom_left.z < 0.0);

        let top_right = camera.emit_ray(199, 199).direction();
        assert!(top_right.x > 0.0 && top_right.y > 0.0 && top_right.z < 0.0);
    }

    #[test]
    fn test_corner_ray_matches_fov() {
        // 90° fov: the outermost pixel centers sit just inside 45°.
        let camera = camera();
        let ray = camera.emit_ray(100, 199).direction();
        let expected = (199.5f32 / 200.0) * 2.0 - 1.0;

        assert!((ray.x / -ray.z - expected).abs() < 1e-4);
    }

    #[test]
    fn test_emit_ray_is_deterministic() {
        let camera = camera();
        for (row, col) in [(0, 0), (17, 123), (199, 5)] {
            let a = camera.emit_ray(row, col);
            let b = camera.emit_ray(row, col);
            assert_eq!(a.origin().to_array(), b.origin().to_array());
            assert_eq!(a.direction().to_array(), b.direction().to_array());
        }
    }

    #[test]
    fn test_forward_step_is_exact() {
        let mut camera = camera();
        camera.step(Direction::Forward);
        assert_eq!(camera.position().z, 10.0 - MOVE_SPEED);

        camera.step(Direction::Backward);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_left_right_are_inverse() {
        let mut camera = camera();
        let start = camera.position();

        camera.step(Direction::Left);
        assert_eq!(camera.position().x, start.x - MOVE_SPEED);

        camera.step(Direction::Right);
        assert_eq!(camera.position().x, start.x);
        assert!((camera.position() - start).length() < 1e-6);
    }

    #[test]
    fn test_translation_keeps_orientation() {
        let mut camera = camera();
        camera.step(Direction::Left);
        camera.step(Direction::Left);

        assert_eq!(camera.front(), -Vec3::Z);
        assert_eq!(camera.target(), camera.position() - Vec3::Z);
    }

    #[test]
    fn test_rotation_turns_front_and_keeps_position() {
        let mut camera = camera();
        camera.step(Direction::RotateLeft);

        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 10.0));
        assert!(camera.front().x < 0.0);
        assert!((camera.front().length() - 1.0).abs() < 1e-6);
        assert!((camera.front().angle_between(-Vec3::Z) - ROTATE_SPEED).abs() < 1e-5);

        camera.step(Direction::RotateRight);
        assert!((camera.front() - -Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_validation() {
        let zero = Camera::new(Vec3::ZERO, -Vec3::Z, 0, 10);
        assert!(matches!(zero.validate(), Err(RenderError::ZeroResolution { width: 0, height: 10 })));

        let wide = camera().with_fov(PI);
        assert!(matches!(wide.validate(), Err(RenderError::InvalidFov(_))));

        let straight_down = Camera::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 10, 10);
        assert!(matches!(straight_down.validate(), Err(RenderError::DegenerateView)));

        let tilted = camera().with_up(Vec3::Z);
        assert!(matches!(tilted.validate(), Err(RenderError::DegenerateView)));
        assert!(camera().with_up(Vec3::X).validate().is_ok());
    }

    #[test]
    fn test_set_resolution() {
        let mut camera = camera();
        camera.set_resolution(320, 240).unwrap();
        assert_eq!(camera.aspect_ratio(), 320.0 / 240.0);

        assert!(camera.set_resolution(0, 240).is_err());
        assert_eq!(camera.width(), 320);
    }

    #[test]
    fn test_from_description() {
        let camera = Camera::from(&CameraDescription::default());
        assert_eq!(camera.width(), 200);
        assert!((camera.fov() - PI / 2.0).abs() < 1e-6);
    }
}
