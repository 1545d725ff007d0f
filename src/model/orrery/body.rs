use std::path::{Path, PathBuf};

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::math::geometry::{orbit_direction, wrap_angle, HOURS_PER_DAY};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

/// How `position` is interpreted for a body that isn't orbiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFrame {
    /// `position` is in world space; the parent link is purely logical.
    World,
    /// `position` is an offset from the parent's world position.
    ParentRelative,
}

/// A celestial body: geometry, appearance, orbit around an optional parent,
/// and a sequence of spins applied over time.
#[derive(Debug, Clone)]
pub struct AstrObject {
    name: String,
    // -- geometry --
    radius: f64,
    size_factor: f64,
    position: Point3<f64>,
    position_frame: PositionFrame,
    world_position: Point3<f64>,
    // -- appearance --
    texture: Option<PathBuf>,
    material_id: usize,
    // -- orbit --
    orbit: u32,
    orbit_radius: f64,
    orbit_center: Vector3<f64>,
    orbit_period: f64,
    orbit_angle: f64,
    orbit_speed_factor: f64,
    parent: Option<BodyID>,
    satellites: Vec<BodyID>,
    // -- rotation --
    tilt: UnitQuaternion<f64>,
    rotations: Vec<UnitQuaternion<f64>>,
    rotation_angles: Vec<f64>,
    rotation_speed_factor: f64,
    orientation: UnitQuaternion<f64>,
}

impl AstrObject {
    pub fn new(name: impl Into<String>, tilt: UnitQuaternion<f64>, radius: f64) -> Self {
        AstrObject {
            name: name.into(),
            radius,
            size_factor: 1.0,
            position: Point3::origin(),
            position_frame: PositionFrame::World,
            world_position: Point3::origin(),
            texture: None,
            material_id: 0,
            orbit: 0,
            orbit_radius: 0.0,
            orbit_center: Vector3::zeros(),
            orbit_period: 0.0,
            orbit_angle: 0.0,
            orbit_speed_factor: 0.0,
            parent: None,
            satellites: vec![],
            tilt,
            rotations: vec![],
            rotation_angles: vec![],
            rotation_speed_factor: 1.0,
            orientation: tilt,
        }
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radius as drawn, i.e. including the visual size factor.
    pub fn apparent_radius(&self) -> f64 {
        self.radius * self.size_factor
    }

    pub fn size_factor(&self) -> f64 {
        self.size_factor
    }

    /// World-space position as of the last update.
    pub fn position(&self) -> Point3<f64> {
        self.world_position
    }

    /// Position as configured, interpreted according to `position_frame`.
    pub fn local_position(&self) -> Point3<f64> {
        self.position
    }

    pub fn position_frame(&self) -> PositionFrame {
        self.position_frame
    }

    pub fn texture(&self) -> Option<&Path> {
        self.texture.as_deref()
    }

    pub fn material_id(&self) -> usize {
        self.material_id
    }

    pub fn orbit(&self) -> u32 {
        self.orbit
    }

    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    pub fn orbit_center(&self) -> Vector3<f64> {
        self.orbit_center
    }

    pub fn orbit_period(&self) -> f64 {
        self.orbit_period
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn orbit_speed_factor(&self) -> f64 {
        self.orbit_speed_factor
    }

    pub fn parent(&self) -> Option<BodyID> {
        self.parent
    }

    pub fn satellites(&self) -> &[BodyID] {
        &self.satellites
    }

    pub fn is_satellite(&self) -> bool {
        self.parent.is_some()
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit_radius > 0.0
    }

    pub fn rotations(&self) -> &[UnitQuaternion<f64>] {
        &self.rotations
    }

    pub fn rotates(&self) -> bool {
        !self.rotations.is_empty()
    }

    pub fn rotation_speed_factor(&self) -> f64 {
        self.rotation_speed_factor
    }

    pub fn tilt(&self) -> UnitQuaternion<f64> {
        self.tilt
    }

    pub fn orientation(&self) -> UnitQuaternion<f64> {
        self.orientation
    }

    // Setters

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn set_size_factor(&mut self, size_factor: f64) {
        self.size_factor = size_factor;
    }

    /// Sets the configured position. World positions of roots follow
    /// immediately; anything relative to a parent waits for the next update.
    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
        if self.parent.is_none() && !self.is_orbiting() {
            self.world_position = position;
        }
    }

    pub fn set_texture(&mut self, path: impl Into<PathBuf>) {
        self.texture = Some(path.into());
    }

    pub fn set_material_id(&mut self, id: usize) {
        self.material_id = id;
    }

    pub fn set_orbit(&mut self, orbit: u32) {
        self.orbit = orbit;
    }

    pub fn set_orbit_radius(&mut self, orbit_radius: f64) {
        self.orbit_radius = orbit_radius;
    }

    pub fn set_orbit_angle(&mut self, theta: f64) {
        self.orbit_angle = wrap_angle(theta);
    }

    pub fn set_orbit_speed_factor(&mut self, factor: f64) {
        self.orbit_speed_factor = factor;
    }

    pub fn set_rotation_speed_factor(&mut self, factor: f64) {
        self.rotation_speed_factor = factor;
    }

    pub fn set_rotations(&mut self, rotations: Vec<UnitQuaternion<f64>>) {
        self.rotation_angles = vec![0.0; rotations.len()];
        self.rotations = rotations;
        self.recompute_orientation();
    }

    pub fn add_rotation(&mut self, rotation: UnitQuaternion<f64>) {
        self.rotations.push(rotation);
        self.rotation_angles.push(0.0);
    }

    /// Records the parent, the offset of the orbit's center from the parent,
    /// and the orbital period in days. A positive period also sets the orbit
    /// speed factor to one revolution per period.
    ///
    /// This only touches this object; `Orrery::set_parent` also keeps the
    /// parent's satellite list in sync.
    pub fn set_parent(
        &mut self,
        parent: BodyID,
        orbit_center: Vector3<f64>,
        orbit_period: f64,
        frame: PositionFrame,
    ) {
        self.parent = Some(parent);
        self.orbit_center = orbit_center;
        self.orbit_period = orbit_period;
        self.position_frame = frame;
        if orbit_period > 0.0 {
            self.orbit_speed_factor = std::f64::consts::TAU / orbit_period;
        }
    }

    pub(super) fn clear_parent(&mut self) {
        self.parent = None;
    }

    pub(super) fn add_satellite(&mut self, id: BodyID) {
        if !self.satellites.contains(&id) {
            self.satellites.push(id);
        }
    }

    pub(super) fn remove_satellite(&mut self, id: BodyID) {
        self.satellites.retain(|s| *s != id);
    }

    /// Advances orbit and spin accumulators by `dt` days.
    pub(super) fn advance(&mut self, dt: f64) {
        if self.orbit_speed_factor != 0.0 {
            self.orbit_angle = wrap_angle(self.orbit_angle + self.orbit_speed_factor * dt);
        }

        if self.rotates() && self.rotation_speed_factor != 0.0 {
            let hours = dt * HOURS_PER_DAY * self.rotation_speed_factor;
            for (rotation, angle) in self.rotations.iter().zip(self.rotation_angles.iter_mut()) {
                *angle = wrap_angle(*angle + rotation.angle() * hours);
            }
            self.recompute_orientation();
        }
    }

    fn recompute_orientation(&mut self) {
        let mut orientation = self.tilt;
        for (rotation, angle) in self.rotations.iter().zip(self.rotation_angles.iter()) {
            if let Some(axis) = rotation.axis() {
                orientation *= UnitQuaternion::from_axis_angle(&axis, *angle);
            }
        }
        self.orientation = orientation;
    }

    /// Places this body given its parent's world position (origin for roots).
    pub(super) fn place(&mut self, anchor: Point3<f64>) {
        self.world_position = if self.is_orbiting() {
            anchor + self.orbit_center + self.orbit_radius * orbit_direction(self.orbit_angle)
        } else {
            match (self.parent, self.position_frame) {
                (Some(_), PositionFrame::ParentRelative) => anchor + self.position.coords,
                _ => self.position,
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn make_body() -> AstrObject {
        AstrObject::new("Test", UnitQuaternion::identity(), 1.0)
    }

    #[test]
    fn test_fresh_body() {
        let body = make_body();
        assert!(!body.is_satellite());
        assert!(!body.rotates());
        assert_eq!(body.parent(), None);
        assert_eq!(body.texture(), None);
    }

    #[test]
    fn test_round_trips() {
        let mut body = make_body();
        body.set_radius(3.5);
        assert_eq!(body.radius(), 3.5);
        body.set_material_id(7);
        assert_eq!(body.material_id(), 7);
        body.set_orbit(4);
        assert_eq!(body.orbit(), 4);
        body.set_position(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_add_rotation() {
        let mut body = make_body();
        body.add_rotation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.1));
        assert!(body.rotates());
        assert_eq!(body.rotations().len(), 1);
    }

    #[test]
    fn test_set_parent() {
        let mut body = make_body();
        body.set_parent(BodyID(0), Vector3::zeros(), 4.0, PositionFrame::World);
        assert!(body.is_satellite());
        assert_eq!(body.parent(), Some(BodyID(0)));
        assert_relative_eq!(body.orbit_speed_factor(), PI / 2.0);

        // No period leaves the speed factor alone
        let mut body = make_body();
        body.set_orbit_speed_factor(0.25);
        body.set_parent(BodyID(0), Vector3::zeros(), 0.0, PositionFrame::World);
        assert_relative_eq!(body.orbit_speed_factor(), 0.25);
    }

    #[test]
    fn test_spin() {
        let mut body = make_body();
        // one full turn every 4 hours
        body.add_rotation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0));
        body.advance(1.0 / HOURS_PER_DAY);
        assert_relative_eq!(body.orientation() * Vector3::x(), Vector3::y(), epsilon = 1e-9);

        body.set_rotation_speed_factor(2.0);
        body.advance(1.0 / HOURS_PER_DAY);
        assert_relative_eq!(body.orientation() * Vector3::x(), -Vector3::y(), epsilon = 1e-9);
    }

    #[test]
    fn test_place() {
        let mut body = make_body();
        body.set_position(Point3::new(1.0, 0.0, 0.0));
        body.set_parent(BodyID(0), Vector3::zeros(), 0.0, PositionFrame::ParentRelative);
        body.place(Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(body.position(), Point3::new(11.0, 0.0, 0.0));

        body.set_orbit_radius(2.0);
        body.set_orbit_angle(PI / 2.0);
        body.place(Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(body.position(), Point3::new(10.0, 2.0, 0.0), epsilon = 1e-12);
    }
}
