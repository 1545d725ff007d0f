use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::event::{Action, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Point2, Point3, Vector2};

use super::camera::ZoomableCamera;
use super::picking;
use crate::model::orrery::{BodyID, Orrery};

pub const MAX_CAMERAS: usize = 4;

/// A window rectangle in pixels, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Viewport {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: &Point2<f32>) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        point.x >= x
            && point.y >= y
            && point.x < x + self.width as f32
            && point.y < y + self.height as f32
    }

    /// Converts window coordinates into coordinates local to this viewport.
    pub fn to_local(&self, point: &Point2<f32>) -> Point2<f32> {
        Point2::new(point.x - self.x as f32, point.y - self.y as f32)
    }
}

/// Splits a window among `n_cams` cameras: one fills the window, two sit
/// side by side, three or four share a 2x2 grid.
pub fn layout(n_cams: usize, width: u32, height: u32) -> [Viewport; MAX_CAMERAS] {
    let mut viewports = [Viewport::default(); MAX_CAMERAS];
    let (half_w, half_h) = (width / 2, height / 2);
    match n_cams {
        0 | 1 => {
            viewports[0] = Viewport::new(0, 0, width, height);
        }
        2 => {
            viewports[0] = Viewport::new(0, 0, half_w, height);
            viewports[1] = Viewport::new(half_w, 0, width - half_w, height);
        }
        _ => {
            viewports[0] = Viewport::new(0, 0, half_w, half_h);
            viewports[1] = Viewport::new(half_w, 0, width - half_w, half_h);
            viewports[2] = Viewport::new(0, half_h, half_w, height - half_h);
            viewports[3] = Viewport::new(half_w, half_h, width - half_w, height - half_h);
        }
    }
    viewports
}

/// Up to four cameras, each drawing into its own viewport and following its
/// own target body. To kiss3d this is a single multi-pass camera: pass `i`
/// renders camera `i`.
pub struct CameraRig {
    cameras: [ZoomableCamera; MAX_CAMERAS],
    targets: [Option<BodyID>; MAX_CAMERAS],
    viewports: [Viewport; MAX_CAMERAS],
    n_cams: usize,
    window_size: (u32, u32),
    // -- mouse --
    last_cursor_pos: Vector2<f32>,
    dragged_cam: Option<usize>,
    mouse_locked: bool,
}

impl CameraRig {
    pub fn new(n_cams: usize, width: u32, height: u32, distance: f32) -> Self {
        let mut rig = CameraRig {
            cameras: [
                ZoomableCamera::new(distance),
                ZoomableCamera::new(distance),
                ZoomableCamera::new(distance),
                ZoomableCamera::new(distance),
            ],
            targets: [None; MAX_CAMERAS],
            viewports: [Viewport::default(); MAX_CAMERAS],
            n_cams: 1,
            window_size: (width, height),
            last_cursor_pos: Vector2::zeros(),
            dragged_cam: None,
            mouse_locked: false,
        };
        rig.set_camera_count(n_cams);
        rig
    }

    pub fn camera_count(&self) -> usize {
        self.n_cams
    }

    pub fn set_camera_count(&mut self, n_cams: usize) {
        self.n_cams = n_cams.clamp(1, MAX_CAMERAS);
        self.setup_viewports();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.setup_viewports();
    }

    pub fn setup_viewports(&mut self) {
        let (width, height) = self.window_size;
        self.viewports = layout(self.n_cams, width, height);
        for (camera, viewport) in self.cameras.iter_mut().zip(self.viewports.iter()) {
            camera.set_size(viewport.width.max(1), viewport.height.max(1));
        }
    }

    pub fn viewport(&self, cam: usize) -> Viewport {
        self.viewports[cam]
    }

    pub fn camera(&self, cam: usize) -> &ZoomableCamera {
        &self.cameras[cam]
    }

    pub fn camera_mut(&mut self, cam: usize) -> &mut ZoomableCamera {
        &mut self.cameras[cam]
    }

    pub fn active_cameras(&self) -> impl Iterator<Item = usize> {
        0..self.n_cams
    }

    pub fn target(&self, cam: usize) -> Option<BodyID> {
        self.targets[cam]
    }

    pub fn set_target(&mut self, cam: usize, target: Option<BodyID>) {
        self.targets[cam] = target;
    }

    /// Which active camera's viewport contains this window point?
    pub fn camera_at(&self, point: &Point2<f32>) -> Option<usize> {
        self.active_cameras()
            .find(|cam| self.viewports[*cam].contains(point))
    }

    /// Picks the body under a window point, using whichever camera's
    /// viewport the point falls in.
    pub fn pick(&self, orrery: &Orrery, point: &Point2<f32>) -> Option<BodyID> {
        let cam = self.camera_at(point)?;
        let local = self.viewports[cam].to_local(point);
        picking::pick(&self.cameras[cam], &local, picking::candidates(orrery))
    }

    /// While locked, clicks belong to picking, and drags and scrolls don't move cameras.
    pub fn set_mouse_locked(&mut self, locked: bool) {
        self.mouse_locked = locked;
        if locked {
            self.dragged_cam = None;
        }
    }

    /// Applies a window event to the camera under the cursor. `dragging` is
    /// whether the left mouse button is held.
    pub fn route_event(&mut self, event: &WindowEvent, dragging: bool) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if dragging && !self.mouse_locked {
                    // Keep dragging the camera the drag started in, even if the
                    // cursor wanders into a neighbouring viewport.
                    let cam = self.dragged_cam.or_else(|| self.cursor_cam());
                    if let Some(cam) = cam {
                        self.dragged_cam = Some(cam);
                        self.cameras[cam].drag(curr_pos - self.last_cursor_pos);
                    }
                } else {
                    self.dragged_cam = None;
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) if !self.mouse_locked => {
                if let Some(cam) = self.cursor_cam() {
                    self.cameras[cam].scroll(off);
                }
            }
            WindowEvent::FramebufferSize(w, h) => self.resize(w, h),
            WindowEvent::Key(key, Action::Press, _) => {
                if let Some(cam) = self.cursor_cam() {
                    self.cameras[cam].handle_key(key);
                }
            }
            _ => {}
        }
    }

    fn cursor_cam(&self) -> Option<usize> {
        let pos = Point2::from(self.last_cursor_pos);
        self.camera_at(&pos)
    }

    fn main_camera(&self) -> &ZoomableCamera {
        &self.cameras[0]
    }
}

impl Camera for CameraRig {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        let pressed = canvas.get_mouse_button(MouseButton::Button1) == Action::Press;
        self.route_event(event, pressed);
    }

    fn eye(&self) -> Point3<f32> {
        self.main_camera().eye()
    }

    fn view_transform(&self) -> Isometry3<f32> {
        self.main_camera().view_transform()
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.main_camera().transformation()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        self.main_camera().clip_planes()
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        pass: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        let camera = &self.cameras[pass];
        proj.upload(&camera.projection_matrix());
        view.upload(&camera.view_matrix());
    }

    fn num_passes(&self) -> usize {
        self.n_cams
    }

    fn start_pass(&self, pass: usize, canvas: &Canvas) {
        // GL viewports start at the bottom left
        let (_, win_h) = canvas.size();
        let viewport = self.viewports[pass];
        let x = viewport.x as i32;
        let y = win_h as i32 - (viewport.y + viewport.height) as i32;
        let ctxt = Context::get();
        ctxt.viewport(x, y, viewport.width as i32, viewport.height as i32);
        ctxt.scissor(x, y, viewport.width as i32, viewport.height as i32);
    }

    fn render_complete(&self, canvas: &Canvas) {
        let (w, h) = canvas.size();
        let ctxt = Context::get();
        ctxt.viewport(0, 0, w as i32, h as i32);
        ctxt.scissor(0, 0, w as i32, h as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use kiss3d::event::Modifiers;

    #[test]
    fn test_single_layout() {
        let viewports = layout(1, 800, 600);
        assert_eq!(viewports[0], Viewport::new(0, 0, 800, 600));
    }

    #[test]
    fn test_split_layout() {
        let viewports = layout(2, 801, 600);
        assert_eq!(viewports[0], Viewport::new(0, 0, 400, 600));
        assert_eq!(viewports[1], Viewport::new(400, 0, 401, 600));
    }

    #[test]
    fn test_grid_layout() {
        let viewports = layout(4, 800, 600);
        assert_eq!(viewports[0], Viewport::new(0, 0, 400, 300));
        assert_eq!(viewports[1], Viewport::new(400, 0, 400, 300));
        assert_eq!(viewports[2], Viewport::new(0, 300, 400, 300));
        assert_eq!(viewports[3], Viewport::new(400, 300, 400, 300));

        // Every pixel belongs to exactly one viewport
        for &(x, y) in &[(0.0, 0.0), (399.5, 299.5), (400.0, 300.0), (799.0, 599.0)] {
            let pt = Point2::new(x, y);
            assert_eq!(viewports.iter().filter(|v| v.contains(&pt)).count(), 1);
        }
    }

    #[test]
    fn test_rig_resize() {
        let mut rig = CameraRig::new(4, 800, 600, 50.0);
        assert_eq!(rig.camera_at(&Point2::new(700.0, 500.0)), Some(3));

        rig.set_camera_count(1);
        assert_eq!(rig.camera_at(&Point2::new(700.0, 500.0)), Some(0));

        rig.resize(1000, 1000);
        assert_eq!(rig.viewport(0), Viewport::new(0, 0, 1000, 1000));
        assert_eq!(rig.camera(0).width(), 1000);
        assert_eq!(rig.camera_at(&Point2::new(1200.0, 10.0)), None);
    }

    #[test]
    fn test_pick_through_viewport() {
        let mut orrery = Orrery::new();
        let sun = orrery.add_body(crate::model::orrery::AstrObject::new(
            "Sun",
            nalgebra::UnitQuaternion::identity(),
            5.0,
        ));

        // The sun sits at the center of every viewport
        let rig = CameraRig::new(4, 800, 600, 100.0);
        assert_eq!(rig.pick(&orrery, &Point2::new(200.0, 150.0)), Some(sun));
        assert_eq!(rig.pick(&orrery, &Point2::new(600.0, 450.0)), Some(sun));
        assert_eq!(rig.pick(&orrery, &Point2::new(400.0, 300.0)), None);
    }

    fn scroll_under(rig: &mut CameraRig, x: f64, y: f64) {
        rig.route_event(&WindowEvent::CursorPos(x, y, Modifiers::empty()), false);
        rig.route_event(&WindowEvent::Scroll(0.0, 1.0, Modifiers::empty()), false);
    }

    #[test]
    fn test_scroll_zooms_camera_under_cursor() {
        let mut rig = CameraRig::new(2, 800, 600, 100.0);
        scroll_under(&mut rig, 600.0, 300.0);

        assert_relative_eq!(rig.camera(0).distance(), 100.0);
        assert!(rig.camera(1).distance() < 100.0);
    }

    #[test]
    fn test_locked_mouse_keeps_cameras_still() {
        let mut rig = CameraRig::new(1, 800, 600, 100.0);
        rig.set_mouse_locked(true);
        let eye = rig.camera(0).eye();

        scroll_under(&mut rig, 400.0, 300.0);
        assert_relative_eq!(rig.camera(0).distance(), 100.0);

        rig.route_event(&WindowEvent::CursorPos(450.0, 320.0, Modifiers::empty()), true);
        assert_relative_eq!(rig.camera(0).eye(), eye);

        rig.set_mouse_locked(false);
        scroll_under(&mut rig, 400.0, 300.0);
        assert!(rig.camera(0).distance() < 100.0);
    }

    #[test]
    fn test_camera_count_clamped() {
        let mut rig = CameraRig::new(9, 800, 600, 50.0);
        assert_eq!(rig.camera_count(), MAX_CAMERAS);
        rig.set_camera_count(0);
        assert_eq!(rig.camera_count(), 1);
    }
}
