use std::f32::consts::PI;

use kiss3d::event::Key;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector2, Vector3};

// Letters and +/- belong to the dialog menus
const KEY_CAMERA_MOVE_UP: Key = Key::Up;
const KEY_CAMERA_MOVE_DOWN: Key = Key::Down;
const KEY_CAMERA_MOVE_LEFT: Key = Key::Left;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::Right;
const KEY_CAMERA_ZOOM_IN: Key = Key::PageUp;
const KEY_CAMERA_ZOOM_OUT: Key = Key::PageDown;

const KEY_ANGLE_STEP: f32 = 0.1;

/// Stay well inside the starfield sphere.
pub const MAX_DISTANCE: f32 = 300.0;
const KEY_ZOOM_STEP: f32 = 1.2;

// A close cousin of ArcBall: drag to change pitch and yaw, scroll to zoom.
// Zooming also moves the clipping planes, so that we can go from a moon's
// surface to the whole system without z-fighting.
//
// The camera always looks at `target` and uses the z-axis as up. The target
// is moved every frame to wherever the followed body currently is. Several
// of these share one window, so the camera itself doesn't implement kiss3d's
// Camera; `CameraRig` does, and routes events here.
#[derive(Debug, Clone)]
pub struct ZoomableCamera {
    // -- position --
    target: Point3<f32>,
    theta: f32,  // azimuthal angle
    phi: f32,    // polar angle
    radius: f32, // distance from target
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    // -- knobs to fiddle with --
    theta_step: f32,
    phi_step: f32,
    scroll_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
    z_near_multiplier: f32,
    z_far_multipler: f32,
}

impl ZoomableCamera {
    pub fn new(radius: f32) -> Self {
        ZoomableCamera {
            target: Point3::origin(),
            theta: -PI / 2.0,
            phi: PI / 3.0,
            radius,
            width: 800,
            height: 600,
            fovy: PI / 4.0,
            theta_step: 0.005,
            phi_step: 0.005,
            scroll_ratio: 1.25,
            phi_limit: 0.001,
            radius_limits: (1.0, MAX_DISTANCE),
            z_near_multiplier: 0.01,
            z_far_multipler: 2000.0,
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height.max(1) as f32,
            self.fovy,
            self.radius * self.z_near_multiplier,
            self.radius * self.z_far_multipler,
        )
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn eye(&self) -> Point3<f32> {
        self.target
            + self.radius
                * Vector3::new(
                    self.theta.cos() * self.phi.sin(),
                    self.theta.sin() * self.phi.sin(),
                    self.phi.cos(),
                )
    }

    pub fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &self.target, &Vector3::z())
    }

    pub fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn clip_planes(&self) -> (f32, f32) {
        let projection = self.projection();
        (projection.znear(), projection.zfar())
    }

    /// World-space direction of the screen's x-axis.
    pub fn right(&self) -> Vector3<f32> {
        self.view_transform()
            .inverse()
            .transform_vector(&Vector3::x())
            .normalize()
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn set_target(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_min_distance(&mut self, min_dist: f32) {
        self.radius_limits.0 = min_dist;
        self.radius = nalgebra::clamp(self.radius, self.radius_limits.0, self.radius_limits.1);
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    pub fn drag(&mut self, dpos: Vector2<f32>) {
        // Rotate the opposite direction as the mouse moves (drag right == camera glides
        // left)
        self.rotate(-dpos.x * self.theta_step, -dpos.y * self.phi_step);
    }

    pub fn scroll(&mut self, off: f64) {
        // scroll up == zoom in
        if off < 0.0 {
            self.zoom(self.scroll_ratio);
        } else if off > 0.0 {
            self.zoom(self.scroll_ratio.recip())
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            KEY_CAMERA_MOVE_UP => self.rotate(0.0, -KEY_ANGLE_STEP),
            KEY_CAMERA_MOVE_DOWN => self.rotate(0.0, KEY_ANGLE_STEP),
            KEY_CAMERA_MOVE_LEFT => self.rotate(-KEY_ANGLE_STEP, 0.0),
            KEY_CAMERA_MOVE_RIGHT => self.rotate(KEY_ANGLE_STEP, 0.0),
            KEY_CAMERA_ZOOM_IN => self.zoom(KEY_ZOOM_STEP.recip()),
            KEY_CAMERA_ZOOM_OUT => self.zoom(KEY_ZOOM_STEP),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_eye_follows_target() {
        let mut camera = ZoomableCamera::new(10.0);
        let before = camera.eye() - camera.target();
        camera.set_target(Point3::new(5.0, -3.0, 1.0));
        let after = camera.eye() - camera.target();
        assert_relative_eq!(before, after, epsilon = 1e-5);
        assert_relative_eq!(after.norm(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = ZoomableCamera::new(10.0);
        camera.set_min_distance(5.0);
        camera.zoom(0.1);
        assert_relative_eq!(camera.distance(), 5.0);
        camera.zoom(1e9);
        assert_relative_eq!(camera.distance(), MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = ZoomableCamera::new(10.0);
        camera.rotate(0.0, 100.0);
        assert!(camera.eye().z > -10.0);
        assert!(camera.eye().z < -9.9);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = ZoomableCamera::new(20.0);
        camera.set_target(Point3::new(3.0, 4.0, 0.0));
        let ndc = camera.transformation().transform_point(&camera.target());
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
    }
}
