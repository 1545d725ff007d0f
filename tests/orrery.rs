use std::f64::consts::TAU;
use std::path::Path;

use approx::assert_relative_eq;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use orrery_viz::gui::picking::{self, project};
use orrery_viz::gui::viewports::CameraRig;
use orrery_viz::model::orrery::{AstrObject, Orrery, PositionFrame};
use orrery_viz::model::solar_system::{self, EARTH, IO, JUPITER, MOON, SATURN, SUN};
use orrery_viz::model::AppState;

const DT: f64 = 0.05;

fn snapshot(orrery: &Orrery) -> Vec<(Point3<f64>, UnitQuaternion<f64>, f64)> {
    orrery
        .bodies()
        .map(|(_, b)| (b.position(), b.orientation(), b.orbit_angle()))
        .collect()
}

#[test]
fn test_orbit_angle_after_frames() {
    let mut orrery = Orrery::new();
    let sun = orrery.add_body(AstrObject::new("Sun", UnitQuaternion::identity(), 5.0));
    let planet = orrery.add_body(AstrObject::new("Planet", UnitQuaternion::identity(), 1.0));
    orrery.get_body_mut(planet).set_orbit_radius(10.0);
    orrery.set_parent(planet, sun, Vector3::zeros(), 0.0, PositionFrame::World);
    orrery.get_body_mut(planet).set_orbit_speed_factor(0.3);

    let state = AppState::new();
    let frames = 500;
    for _ in 0..frames {
        orrery.update(&state, DT);
    }

    let expected = (0.3 * frames as f64 * DT) % TAU;
    let body = orrery.get_body(planet);
    assert_relative_eq!(body.orbit_angle(), expected, epsilon = 1e-9);
    assert_relative_eq!(
        body.position(),
        Point3::new(10.0 * expected.cos(), 10.0 * expected.sin(), 0.0),
        epsilon = 1e-9
    );
}

#[test]
fn test_full_stop_freezes_everything() {
    let mut orrery = solar_system::build(Path::new("assets"));
    let mut state = AppState::new();
    for _ in 0..10 {
        orrery.update(&state, DT);
    }

    let before = snapshot(&orrery);
    state.full_stop = true;
    for _ in 0..100 {
        orrery.update(&state, DT);
    }
    assert_eq!(snapshot(&orrery), before);

    // Resuming carries on from where it stopped
    state.full_stop = false;
    orrery.update(&state, DT);
    let earth_before = before[EARTH.0].2;
    let earth = orrery.get_body(EARTH);
    assert_relative_eq!(
        earth.orbit_angle(),
        earth_before + earth.orbit_speed_factor() * DT,
        epsilon = 1e-9
    );
}

#[test]
fn test_satellites_and_parents() {
    let orrery = solar_system::build(Path::new("assets"));
    for (id, body) in orrery.bodies() {
        match body.parent() {
            None => {
                assert!(!body.is_satellite());
                assert_eq!(id, SUN);
            }
            Some(parent) => {
                assert!(body.is_satellite());
                assert!(orrery.get_body(parent).satellites().contains(&id));
            }
        }
    }
}

#[test]
fn test_moons_keep_their_distance() {
    let mut orrery = solar_system::build(Path::new("assets"));
    let state = AppState::new();
    for _ in 0..250 {
        orrery.update(&state, DT);
        let earth = orrery.get_body(EARTH);
        let moon = orrery.get_body(MOON);
        assert_relative_eq!(
            (moon.position() - earth.position()).norm(),
            moon.orbit_radius(),
            epsilon = 1e-9
        );
        let io = orrery.get_body(IO);
        let jupiter = orrery.get_body(JUPITER);
        assert_relative_eq!(
            (io.position() - jupiter.position()).norm(),
            io.orbit_radius(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_everything_spins() {
    let mut orrery = solar_system::build(Path::new("assets"));
    assert!(orrery.bodies().all(|(_, b)| b.rotates()));

    let before = orrery.get_body(SATURN).orientation();
    orrery.update(&AppState::new(), DT);
    let after = orrery.get_body(SATURN).orientation();
    assert!(before.angle_to(&after) > 1e-6);

    // Spinning never moves the spin axis
    let axis_before = before * Vector3::z();
    let axis_after = after * Vector3::z();
    assert_relative_eq!(axis_before, axis_after, epsilon = 1e-9);
}

#[test]
fn test_parent_relative_frame() {
    let mut orrery = Orrery::new();
    let sun = orrery.add_body(AstrObject::new("Sun", UnitQuaternion::identity(), 5.0));
    let planet = orrery.add_body(AstrObject::new("Planet", UnitQuaternion::identity(), 1.0));
    let station = orrery.add_body(AstrObject::new("Station", UnitQuaternion::identity(), 0.1));
    orrery.get_body_mut(planet).set_orbit_radius(10.0);
    orrery.set_parent(planet, sun, Vector3::zeros(), 4.0, PositionFrame::World);

    orrery.set_position(station, Point3::new(0.0, 0.0, 2.0));
    orrery.set_parent(station, planet, Vector3::zeros(), 0.0, PositionFrame::ParentRelative);

    let state = AppState::new();
    for _ in 0..37 {
        orrery.update(&state, DT);
        let offset = orrery.get_body(station).position() - orrery.get_body(planet).position();
        assert_relative_eq!(offset, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-9);
    }

    // A world-frame satellite that doesn't orbit stays where it was put
    orrery.set_parent(station, planet, Vector3::zeros(), 0.0, PositionFrame::World);
    orrery.update(&state, DT);
    assert_relative_eq!(
        orrery.get_body(station).position(),
        Point3::new(0.0, 0.0, 2.0)
    );
}

#[test]
fn test_pick_every_visible_body() {
    let orrery = solar_system::build(Path::new("assets"));
    let rig = CameraRig::new(1, 1200, 900, 150.0);
    let camera = rig.camera(0);

    // Looking at the whole system, each planet is findable where it's drawn
    for id in [EARTH, JUPITER, SATURN].iter() {
        let center = nalgebra::convert(orrery.get_body(*id).position());
        let cursor = project(camera, &center).unwrap();
        let picked = picking::pick(camera, &cursor, picking::candidates(&orrery));
        assert_eq!(picked, Some(*id));
    }
}

#[test]
fn test_pick_nothing() {
    let orrery = solar_system::build(Path::new("assets"));
    let rig = CameraRig::new(1, 1200, 900, 150.0);
    let far_corner = nalgebra::Point2::new(1.0, 1.0);
    assert_eq!(rig.pick(&orrery, &far_corner), None);
    assert_eq!(rig.pick(&orrery, &nalgebra::Point2::new(5000.0, 5000.0)), None);
}
