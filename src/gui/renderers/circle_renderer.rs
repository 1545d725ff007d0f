use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::{Point3, Vector3};

use super::utils::{draw_polyline, sample_parametric};

const NUM_SEGMENTS: usize = 128;

struct CircleData {
    center: Point3<f32>,
    // Orthonormal pair spanning the circle's plane
    u: Vector3<f32>,
    v: Vector3<f32>,
    radius: f32,
    color: Point3<f32>,
}

/// Draws circles fixed in world space (orbits, rings, highlights).
///
/// kiss3d's LineRenderer forgets its lines after every render call, but a
/// multi-viewport camera renders once per pass. So circles are kept here and
/// reloaded into the line renderer on each pass, then dropped after the last.
pub struct CircleRenderer {
    line_renderer: LineRenderer,
    circles: Vec<CircleData>,
}

impl CircleRenderer {
    pub fn new() -> Self {
        CircleRenderer {
            line_renderer: LineRenderer::new(),
            circles: vec![],
        }
    }

    pub fn add_circle(
        &mut self,
        center: Point3<f32>,
        u: Vector3<f32>,
        v: Vector3<f32>,
        radius: f32,
        color: Point3<f32>,
    ) {
        self.circles.push(CircleData {
            center,
            u,
            v,
            radius,
            color,
        });
    }

    fn load_circle_into_renderer(line_renderer: &mut LineRenderer, circle: &CircleData) {
        let f = |theta: f32| {
            let v = circle.u * theta.cos() + circle.v * theta.sin();
            circle.center + circle.radius * v
        };
        draw_polyline(
            line_renderer,
            sample_parametric(f, 0.0, std::f32::consts::TAU, NUM_SEGMENTS),
            &circle.color,
        );
    }
}

impl Renderer for CircleRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        for circle in self.circles.iter() {
            CircleRenderer::load_circle_into_renderer(&mut self.line_renderer, circle);
        }
        self.line_renderer.render(pass, camera);
        if pass + 1 >= camera.num_passes() {
            self.circles.clear();
        }
    }
}
