use kiss3d::camera::Camera;
use kiss3d::renderer::Renderer;
use nalgebra::{Point3, UnitQuaternion, Vector3};

use self::circle_renderer::CircleRenderer;

mod circle_renderer;
mod utils;

/// Number of line circles used to fake a solid ring.
const RING_BANDS: usize = 24;

pub struct CompoundRenderer {
    circle_renderer: CircleRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            circle_renderer: CircleRenderer::new(),
        }
    }

    /// An orbit path in the xy-plane.
    pub fn draw_orbit(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.circle_renderer
            .add_circle(center, Vector3::x(), Vector3::y(), radius, color);
    }

    /// A flat ring in the equatorial plane of a body with the given orientation,
    /// drawn as closely spaced circles that fade towards the outer edge.
    pub fn draw_ring(
        &mut self,
        center: Point3<f32>,
        orientation: UnitQuaternion<f32>,
        radii: (f32, f32),
        color: Point3<f32>,
    ) {
        let u = orientation * Vector3::x();
        let v = orientation * Vector3::y();
        let (inner, outer) = radii;
        for i in 0..RING_BANDS {
            let t = i as f32 / (RING_BANDS - 1) as f32;
            let radius = inner + t * (outer - inner);
            let band_color = color * (1.0 - 0.6 * t);
            self.circle_renderer
                .add_circle(center, u, v, radius, band_color);
        }
    }

    /// Marks a selected body with a circle slightly wider than it.
    pub fn draw_highlight(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        self.circle_renderer
            .add_circle(center, Vector3::x(), Vector3::y(), radius * 1.4, color);
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.circle_renderer.render(pass, camera);
    }
}
