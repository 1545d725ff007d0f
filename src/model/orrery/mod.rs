use nalgebra::{Point3, Vector3};

use super::app_state::AppState;

mod body;

pub use body::{AstrObject, BodyID, PositionFrame};

/// Flat, owning collection of every body in the scene. Parent links are
/// `BodyID`s into this collection.
#[derive(Debug, Clone, Default)]
pub struct Orrery {
    bodies: Vec<AstrObject>,
}

impl Orrery {
    pub fn new() -> Self {
        Orrery { bodies: vec![] }
    }

    pub fn add_body(&mut self, body: AstrObject) -> BodyID {
        debug_assert!(
            self.find(body.name()).is_none(),
            "Duplicate body name {}",
            body.name()
        );
        let id = BodyID(self.bodies.len());
        self.bodies.push(body);
        id
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get_body(&self, id: BodyID) -> &AstrObject {
        &self.bodies[id.0]
    }

    pub fn get_body_mut(&mut self, id: BodyID) -> &mut AstrObject {
        &mut self.bodies[id.0]
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyID, &AstrObject)> + '_ {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyID(i), b))
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyID> {
        (0..self.bodies.len()).map(BodyID)
    }

    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .position(|b| b.name().eq_ignore_ascii_case(name))
            .map(BodyID)
    }

    pub fn get_parent(&self, id: BodyID) -> Option<BodyID> {
        self.get_body(id).parent()
    }

    /// Makes `child` a satellite of `parent`, keeping both sides of the link
    /// consistent, then re-places every body.
    pub fn set_parent(
        &mut self,
        child: BodyID,
        parent: BodyID,
        orbit_center: Vector3<f64>,
        orbit_period: f64,
        frame: PositionFrame,
    ) {
        assert!(
            !self.is_ancestor(child, parent),
            "{} cannot orbit its own satellite {}",
            self.get_body(child).name(),
            self.get_body(parent).name(),
        );

        if let Some(old_parent) = self.get_parent(child) {
            self.get_body_mut(old_parent).remove_satellite(child);
        }
        self.get_body_mut(child)
            .set_parent(parent, orbit_center, orbit_period, frame);
        self.get_body_mut(parent).add_satellite(child);
        self.recompute_positions();
    }

    /// Detaches `child` from its parent, if any.
    pub fn clear_parent(&mut self, child: BodyID) {
        if let Some(old_parent) = self.get_parent(child) {
            self.get_body_mut(old_parent).remove_satellite(child);
            self.get_body_mut(child).clear_parent();
            self.recompute_positions();
        }
    }

    /// Is `ancestor` equal to `id`, or somewhere up its chain of parents?
    pub fn is_ancestor(&self, ancestor: BodyID, id: BodyID) -> bool {
        let mut current = Some(id);
        // Bounded walk, in case a cycle ever slips in
        for _ in 0..=self.bodies.len() {
            match current {
                Some(c) if c == ancestor => return true,
                Some(c) => current = self.get_parent(c),
                None => return false,
            }
        }
        false
    }

    pub fn set_position(&mut self, id: BodyID, position: Point3<f64>) {
        self.get_body_mut(id).set_position(position);
        self.recompute_positions();
    }

    /// Advances every orbit and spin by `dt` days, unless everything is
    /// stopped, in which case no state changes at all.
    pub fn update(&mut self, state: &AppState, dt: f64) {
        if state.full_stop {
            return;
        }
        for body in self.bodies.iter_mut() {
            body.advance(dt);
        }
        self.recompute_positions();
    }

    /// Places every body, parents before their satellites.
    pub fn recompute_positions(&mut self) {
        let mut stack: Vec<(BodyID, Point3<f64>)> = self
            .ids()
            .filter(|id| self.get_parent(*id).is_none())
            .map(|id| (id, Point3::origin()))
            .collect();

        while let Some((id, anchor)) = stack.pop() {
            let body = self.get_body_mut(id);
            body.place(anchor);
            let position = body.position();
            stack.extend(body.satellites().iter().map(|s| (*s, position)));
        }
    }
}
