use super::orrery::BodyID;

/// Display and pause switches plus the targets of interactive operations.
///
/// Created once at startup and only mutated by the input controller; the
/// update loop and the view read it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub info_text: bool,
    pub draw_orbits: bool,
    pub mouse_picking: bool,
    pub full_stop: bool,
    pub saturn_ring: bool,
    pub draw_fleet: bool,
    pub draw_stars: bool,
    // -- targets of operations --
    pub target_cam: usize,
    pub rotation_target: Option<BodyID>,
    pub scaling_target: Option<BodyID>,
    pub hovered: Option<BodyID>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            info_text: true,
            draw_orbits: true,
            mouse_picking: false,
            full_stop: false,
            saturn_ring: true,
            draw_fleet: false,
            draw_stars: true,
            target_cam: 0,
            rotation_target: None,
            scaling_target: None,
            hovered: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
