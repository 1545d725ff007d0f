use nalgebra::{UnitQuaternion, Vector3};

use std::f64::consts::TAU;

/// Unit vector pointing along an orbit at angle `theta`.
/// Orbits lie in the xy-plane; z is up everywhere in the scene.
pub fn orbit_direction(theta: f64) -> Vector3<f64> {
    Vector3::new(theta.cos(), theta.sin(), 0.0)
}

/// Wraps an angle into [0, 2π).
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Orientation of a body whose spin axis is tipped away from +z by `degrees`,
/// tipping towards -y (i.e. a rotation about +x).
pub fn axial_tilt(degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), degrees.to_radians())
}

pub const HOURS_PER_DAY: f64 = 24.0;

/// The spin a body with the given sidereal day performs in one hour, about its
/// own z-axis. Negative periods spin retrograde.
///
/// Deltas are hourly rather than daily so that fast rotators (Jupiter, Saturn)
/// stay well under half a turn per step and the quaternion keeps its angle.
pub fn hourly_spin(period_days: f64) -> UnitQuaternion<f64> {
    assert!(period_days != 0.0, "Spin period must be non-zero");
    let angle = TAU / (period_days.abs() * HOURS_PER_DAY);
    let axis = if period_days > 0.0 {
        Vector3::z_axis()
    } else {
        -Vector3::z_axis()
    };
    UnitQuaternion::from_axis_angle(&axis, angle)
}
