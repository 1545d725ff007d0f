use kiss3d::renderer::LineRenderer;

use nalgebra::Point3;

/// Samples `f` at `num_segments + 1` evenly spaced parameters from `t_start`
/// to `t_end`, both ends included.
pub fn sample_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(num_segments >= 1, "Need at least one segment");
    let convert = nalgebra::convert::<usize, S>;
    let step = (t_end - t_start) / convert(num_segments);
    (0..=num_segments).map(move |i| f(t_start + step * convert(i)))
}

/// Joins consecutive points with line segments.
pub fn draw_polyline<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut points = points.peekable();
    while let Some(pt) = points.next() {
        if let Some(next) = points.peek() {
            line_renderer.draw_line(pt, *next, *color);
        }
    }
}
