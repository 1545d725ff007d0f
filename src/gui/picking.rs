use std::cmp::Ordering;

use nalgebra::{Point2, Point3};

use super::camera::ZoomableCamera;
use crate::model::orrery::{BodyID, Orrery};

/// Anything smaller than this many pixels is still grabbable.
pub const MIN_PICK_RADIUS: f32 = 4.0;

/// Hits within this many pixels of the closest hit's cursor distance tie with it.
const TIE_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub id: BodyID,
    pub center: Point3<f32>,
    pub radius: f32,
}

/// What a click in a picking mode should change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickPurpose {
    CameraTarget,
    RotationTarget,
    ScalingTarget,
}

/// Projects a world point to pixel coordinates inside the camera's viewport
/// (origin at the top left). Points behind the camera have no projection.
pub fn project(camera: &ZoomableCamera, point: &Point3<f32>) -> Option<Point2<f32>> {
    let clip = camera.transformation() * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    Some(Point2::new(
        (ndc.x + 1.0) / 2.0 * camera.width() as f32,
        (1.0 - ndc.y) / 2.0 * camera.height() as f32,
    ))
}

/// Returns the body under `cursor` (viewport-local pixels), if any.
///
/// A body is hit when the cursor is within its on-screen radius. The closest
/// hit to the cursor wins; on a tie the one that looks smaller wins, so that
/// a moon in front of its planet stays selectable.
pub fn pick<I>(camera: &ZoomableCamera, cursor: &Point2<f32>, candidates: I) -> Option<BodyID>
where
    I: IntoIterator<Item = PickCandidate>,
{
    let right = camera.right();

    let hits: Vec<(BodyID, f32, f32)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let center = project(camera, &candidate.center)?;
            let rim = project(camera, &(candidate.center + candidate.radius * right))?;
            let apparent_radius = f32::max((rim - center).norm(), MIN_PICK_RADIUS);
            let distance = (*cursor - center).norm();
            if distance <= apparent_radius {
                Some((candidate.id, distance, apparent_radius))
            } else {
                None
            }
        })
        .collect();

    // Anything within tolerance of the closest hit ties with it
    let closest = hits.iter().map(|hit| hit.1).fold(f32::INFINITY, f32::min);
    hits.into_iter()
        .filter(|hit| hit.1 < closest + TIE_TOLERANCE)
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal))
        .map(|(id, _, _)| id)
}

/// Every body, as drawn.
pub fn candidates(orrery: &Orrery) -> impl Iterator<Item = PickCandidate> + '_ {
    orrery.bodies().map(|(id, body)| PickCandidate {
        id,
        center: nalgebra::convert(body.position()),
        radius: body.apparent_radius() as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn camera() -> ZoomableCamera {
        let mut camera = ZoomableCamera::new(100.0);
        camera.set_size(800, 600);
        camera
    }

    fn candidate(id: usize, center: Point3<f32>, radius: f32) -> PickCandidate {
        PickCandidate {
            id: BodyID(id),
            center,
            radius,
        }
    }

    #[test]
    fn test_target_is_screen_center() {
        let camera = camera();
        let pt = project(&camera, &Point3::origin()).unwrap();
        assert_relative_eq!(pt, Point2::new(400.0, 300.0), epsilon = 1e-3);
    }

    #[test]
    fn test_pick_at_projection() {
        let camera = camera();
        let bodies = vec![
            candidate(0, Point3::origin(), 5.0),
            candidate(1, Point3::new(30.0, 0.0, 0.0), 1.0),
        ];

        for body in bodies.iter() {
            let cursor = project(&camera, &body.center).unwrap();
            assert_eq!(pick(&camera, &cursor, bodies.clone()), Some(body.id));
        }
    }

    #[test]
    fn test_miss() {
        let camera = camera();
        let bodies = vec![candidate(0, Point3::origin(), 5.0)];
        assert_eq!(pick(&camera, &Point2::new(5.0, 5.0), bodies.clone()), None);
        assert_eq!(pick(&camera, &Point2::new(-500.0, 2000.0), bodies), None);
    }

    #[test]
    fn test_small_bodies_are_grabbable() {
        let camera = camera();
        let bodies = vec![candidate(0, Point3::origin(), 1e-4)];
        let cursor = Point2::new(400.0 + MIN_PICK_RADIUS / 2.0, 300.0);
        assert_eq!(pick(&camera, &cursor, bodies), Some(BodyID(0)));
    }

    #[test]
    fn test_nearest_wins() {
        let camera = camera();
        let big = candidate(0, Point3::origin(), 20.0);
        let small = candidate(1, Point3::new(4.0, 0.0, 0.0), 1.0);
        let cursor = project(&camera, &small.center).unwrap();
        assert_eq!(pick(&camera, &cursor, vec![big, small]), Some(BodyID(1)));
    }

    #[test]
    fn test_tie_goes_to_smaller() {
        let camera = camera();
        // Both on the line of sight through the screen center
        let toward_eye = (camera.eye() - camera.target()).normalize();
        let far = candidate(0, Point3::origin(), 5.0);
        let near = candidate(1, Point3::origin() + 50.0 * toward_eye, 0.5);
        let cursor = Point2::new(400.0, 300.0);
        assert_eq!(pick(&camera, &cursor, vec![far, near]), Some(BodyID(1)));
        assert_eq!(pick(&camera, &cursor, vec![near, far]), Some(BodyID(1)));
    }

    #[test]
    fn test_near_ties_ignore_candidate_order() {
        let camera = camera();
        let right = camera.right();
        // Chain of near-ties: b is within tolerance of a, c of b, but not c of a
        let a = candidate(0, Point3::origin(), 10.0);
        let b = candidate(1, Point3::origin() + 0.055 * right, 5.0);
        let c = candidate(2, Point3::origin() + 0.11 * right, 1.0);
        let cursor = project(&camera, &a.center).unwrap();

        let orders = [
            vec![a, b, c],
            vec![a, c, b],
            vec![b, a, c],
            vec![b, c, a],
            vec![c, a, b],
            vec![c, b, a],
        ];
        for order in orders.iter() {
            assert_eq!(pick(&camera, &cursor, order.clone()), Some(BodyID(1)));
        }
    }

    #[test]
    fn test_behind_camera_is_skipped() {
        let camera = camera();
        let away = (camera.eye() - camera.target()).normalize();
        let behind = candidate(0, camera.eye() + 10.0 * away, 50.0);
        assert_eq!(pick(&camera, &Point2::new(400.0, 300.0), vec![behind]), None);
    }
}
