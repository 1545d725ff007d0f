//! The fixed cast of the scene: the Sun, eight planets, our Moon and the
//! Galilean moons. Distances and radii are in scene units and deliberately
//! not to scale; periods are real, in days.

use std::path::Path;

use nalgebra::{Point3, Vector3};

use super::orrery::{AstrObject, BodyID, Orrery, PositionFrame};
use crate::math::geometry::{axial_tilt, hourly_spin};

pub const SUN: BodyID = BodyID(0);
pub const MERCURY: BodyID = BodyID(1);
pub const VENUS: BodyID = BodyID(2);
pub const EARTH: BodyID = BodyID(3);
pub const MARS: BodyID = BodyID(4);
pub const JUPITER: BodyID = BodyID(5);
pub const SATURN: BodyID = BodyID(6);
pub const URANUS: BodyID = BodyID(7);
pub const NEPTUNE: BodyID = BodyID(8);
pub const MOON: BodyID = BodyID(9);
pub const CALLISTO: BodyID = BodyID(10);
pub const EUROPA: BodyID = BodyID(11);
pub const GANYMEDE: BodyID = BodyID(12);
pub const IO: BodyID = BodyID(13);

pub const NUM_BODIES: usize = 14;

/// Saturn's ring, as multiples of Saturn's radius.
pub const SATURN_RING_RADII: (f64, f64) = (1.2, 2.2);

#[derive(Debug, Clone)]
pub struct Material {
    pub name: &'static str,
    pub color: Point3<f32>,
}

pub const MAT_STAR: usize = 0;
pub const MAT_ROCK: usize = 1;
pub const MAT_OCEAN: usize = 2;
pub const MAT_GAS: usize = 3;
pub const MAT_ICE: usize = 4;
pub const MAT_DUST: usize = 5;

pub fn materials() -> Vec<Material> {
    vec![
        Material {
            name: "star",
            color: Point3::new(1.0, 0.85, 0.3),
        },
        Material {
            name: "rock",
            color: Point3::new(0.6, 0.5, 0.45),
        },
        Material {
            name: "ocean",
            color: Point3::new(0.2, 0.4, 0.9),
        },
        Material {
            name: "gas",
            color: Point3::new(0.85, 0.65, 0.4),
        },
        Material {
            name: "ice",
            color: Point3::new(0.55, 0.8, 0.9),
        },
        Material {
            name: "dust",
            color: Point3::new(0.75, 0.75, 0.72),
        },
    ]
}

struct BodyRow {
    name: &'static str,
    radius: f64,
    tilt_degrees: f64,
    spin_period: f64,
    parent: Option<BodyID>,
    orbit_radius: f64,
    orbit_period: f64,
    start_angle: f64,
    material: usize,
}

#[rustfmt::skip]
static BODIES: [BodyRow; NUM_BODIES] = [
    BodyRow { name: "Sun",      radius: 6.0,  tilt_degrees: 7.25,  spin_period: 25.4,   parent: None,          orbit_radius: 0.0,  orbit_period: 0.0,     start_angle: 0.0, material: MAT_STAR },
    BodyRow { name: "Mercury",  radius: 0.8,  tilt_degrees: 0.03,  spin_period: 58.6,   parent: Some(SUN),     orbit_radius: 14.0, orbit_period: 88.0,    start_angle: 0.4, material: MAT_ROCK },
    BodyRow { name: "Venus",    radius: 1.2,  tilt_degrees: 177.4, spin_period: -243.0, parent: Some(SUN),     orbit_radius: 20.0, orbit_period: 224.7,   start_angle: 2.1, material: MAT_ROCK },
    BodyRow { name: "Earth",    radius: 1.3,  tilt_degrees: 23.44, spin_period: 0.997,  parent: Some(SUN),     orbit_radius: 28.0, orbit_period: 365.25,  start_angle: 4.0, material: MAT_OCEAN },
    BodyRow { name: "Mars",     radius: 1.0,  tilt_degrees: 25.19, spin_period: 1.026,  parent: Some(SUN),     orbit_radius: 36.0, orbit_period: 687.0,   start_angle: 5.5, material: MAT_ROCK },
    BodyRow { name: "Jupiter",  radius: 3.5,  tilt_degrees: 3.13,  spin_period: 0.414,  parent: Some(SUN),     orbit_radius: 52.0, orbit_period: 4332.6,  start_angle: 1.0, material: MAT_GAS },
    BodyRow { name: "Saturn",   radius: 3.0,  tilt_degrees: 26.73, spin_period: 0.444,  parent: Some(SUN),     orbit_radius: 68.0, orbit_period: 10759.2, start_angle: 3.0, material: MAT_GAS },
    BodyRow { name: "Uranus",   radius: 2.0,  tilt_degrees: 97.77, spin_period: -0.718, parent: Some(SUN),     orbit_radius: 82.0, orbit_period: 30688.5, start_angle: 4.6, material: MAT_ICE },
    BodyRow { name: "Neptune",  radius: 2.0,  tilt_degrees: 28.32, spin_period: 0.671,  parent: Some(SUN),     orbit_radius: 94.0, orbit_period: 60182.0, start_angle: 0.2, material: MAT_ICE },
    BodyRow { name: "Moon",     radius: 0.35, tilt_degrees: 6.68,  spin_period: 27.32,  parent: Some(EARTH),   orbit_radius: 2.5,  orbit_period: 27.32,   start_angle: 0.0, material: MAT_DUST },
    BodyRow { name: "Callisto", radius: 0.4,  tilt_degrees: 0.0,   spin_period: 16.69,  parent: Some(JUPITER), orbit_radius: 8.5,  orbit_period: 16.69,   start_angle: 0.5, material: MAT_DUST },
    BodyRow { name: "Europa",   radius: 0.3,  tilt_degrees: 0.1,   spin_period: 3.55,   parent: Some(JUPITER), orbit_radius: 6.0,  orbit_period: 3.55,    start_angle: 2.0, material: MAT_ICE },
    BodyRow { name: "Ganymede", radius: 0.45, tilt_degrees: 0.33,  spin_period: 7.15,   parent: Some(JUPITER), orbit_radius: 7.2,  orbit_period: 7.15,    start_angle: 3.5, material: MAT_DUST },
    BodyRow { name: "Io",       radius: 0.35, tilt_degrees: 0.0,   spin_period: 1.77,   parent: Some(JUPITER), orbit_radius: 5.0,  orbit_period: 1.77,    start_angle: 5.0, material: MAT_ROCK },
];

/// Where a body's texture lives under the asset directory.
pub fn texture_path(assets: &Path, name: &str) -> std::path::PathBuf {
    assets
        .join("textures")
        .join(format!("{}.jpg", name.to_lowercase()))
}

/// Builds every body and wires up parents. Textures are only recorded as
/// paths here; whether they exist is the view's concern.
pub fn build(assets: &Path) -> Orrery {
    let mut orrery = Orrery::new();

    for row in BODIES.iter() {
        let mut body = AstrObject::new(row.name, axial_tilt(row.tilt_degrees), row.radius);
        body.set_texture(texture_path(assets, row.name));
        body.set_material_id(row.material);
        body.add_rotation(hourly_spin(row.spin_period));
        body.set_orbit_radius(row.orbit_radius);
        body.set_orbit_angle(row.start_angle);
        orrery.add_body(body);
    }

    // Satellites get their orbit rank, counted outwards, per parent
    let mut ranks = vec![0u32; NUM_BODIES];
    let mut by_distance: Vec<(usize, &BodyRow)> = BODIES.iter().enumerate().collect();
    by_distance.sort_by(|a, b| a.1.orbit_radius.total_cmp(&b.1.orbit_radius));

    for (i, row) in by_distance {
        let parent = match row.parent {
            Some(parent) => parent,
            None => continue,
        };
        ranks[parent.0] += 1;

        let id = BodyID(i);
        orrery.get_body_mut(id).set_orbit(ranks[parent.0]);
        orrery.set_parent(
            id,
            parent,
            Vector3::zeros(),
            row.orbit_period,
            PositionFrame::World,
        );
    }

    log::debug!("Built solar system with {} bodies", orrery.len());
    orrery
}
