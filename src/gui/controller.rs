use std::time::Instant;

use kiss3d::event::{Action, Event, MouseButton, WindowEvent};
use nalgebra::Point2;

use super::dialog::{Command, Dialog, MouseMode};
use super::picking::PickPurpose;
use super::viewports::CameraRig;
use crate::model::orrery::{BodyID, Orrery};
use crate::model::AppState;

pub struct Controller {
    timestep: f64,
    state: AppState,
    dialog: Dialog,
    cursor_pos: Point2<f32>,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    /// `timestep` is in simulated days per frame.
    pub fn new(timestep: f64, state: AppState) -> Self {
        Controller {
            timestep,
            state,
            dialog: Dialog::new(),
            cursor_pos: Point2::origin(),
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, orrery: &mut Orrery, rig: &mut CameraRig) {
        self.route_event(&event.value, orrery, rig);
    }

    pub fn route_event(&mut self, event: &WindowEvent, orrery: &mut Orrery, rig: &mut CameraRig) {
        match *event {
            WindowEvent::Char(key) => {
                if let Some(command) = self.dialog.handle_key(key) {
                    self.apply_command(command, orrery, rig);
                }
            }
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor_pos = Point2::new(x as f32, y as f32);
                self.refresh_hover(orrery, rig);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                if let MouseMode::Pick(purpose) = self.dialog.mouse_mode() {
                    let picked = rig.pick(orrery, &self.cursor_pos);
                    self.apply_pick(purpose, picked, orrery, rig);
                }
            }
            _ => {}
        }
        rig.set_mouse_locked(self.dialog.mouse_mode() != MouseMode::Camera);
    }

    /// Bodies and cameras move under a still cursor, so this runs every frame
    /// as well as on cursor motion.
    pub fn refresh_hover(&mut self, orrery: &Orrery, rig: &CameraRig) {
        self.state.hovered = if self.state.mouse_picking {
            rig.pick(orrery, &self.cursor_pos)
        } else {
            None
        };
    }

    pub fn apply_command(&mut self, command: Command, orrery: &mut Orrery, rig: &mut CameraRig) {
        let state = &mut self.state;
        match command {
            Command::ToggleInfoText => state.info_text = !state.info_text,
            Command::ToggleOrbits => state.draw_orbits = !state.draw_orbits,
            Command::ToggleMousePicking => {
                state.mouse_picking = !state.mouse_picking;
                state.hovered = None;
            }
            Command::ToggleFullStop => {
                state.full_stop = !state.full_stop;
                log::info!("{}", if state.full_stop { "Stopped" } else { "Resumed" });
            }
            Command::ScaleTimestep(factor) => {
                self.timestep *= factor;
                log::info!("Timestep is {} days/frame", self.timestep);
            }
            Command::SetCameraCount(n) => {
                rig.set_camera_count(n);
                if state.target_cam >= rig.camera_count() {
                    state.target_cam = 0;
                }
            }
            Command::NextTargetCamera => {
                state.target_cam = (state.target_cam + 1) % rig.camera_count();
            }
            Command::SelectTargetCamera(cam) => {
                if cam < rig.camera_count() {
                    state.target_cam = cam;
                } else {
                    log::warn!(
                        "Camera {} isn't shown; only {} active",
                        cam + 1,
                        rig.camera_count()
                    );
                }
            }
            Command::ClearCameraTarget => rig.set_target(state.target_cam, None),
            Command::ScaleRotationSpeed(factor) => {
                if let Some(id) = state.rotation_target {
                    let body = orrery.get_body_mut(id);
                    body.set_rotation_speed_factor(body.rotation_speed_factor() * factor);
                }
            }
            Command::SetRotationSpeed(speed) => {
                if let Some(id) = state.rotation_target {
                    orrery.get_body_mut(id).set_rotation_speed_factor(speed);
                }
            }
            Command::ScaleSize(factor) => {
                if let Some(id) = state.scaling_target {
                    let body = orrery.get_body_mut(id);
                    body.set_size_factor(body.size_factor() * factor);
                }
            }
            Command::SetSize(size) => {
                if let Some(id) = state.scaling_target {
                    orrery.get_body_mut(id).set_size_factor(size);
                }
            }
            Command::ToggleSaturnRing => state.saturn_ring = !state.saturn_ring,
            Command::ToggleFleet => state.draw_fleet = !state.draw_fleet,
            Command::ToggleStars => state.draw_stars = !state.draw_stars,
        }
    }

    pub fn apply_pick(
        &mut self,
        purpose: PickPurpose,
        picked: Option<BodyID>,
        orrery: &Orrery,
        rig: &mut CameraRig,
    ) {
        let id = match picked {
            Some(id) => id,
            None => return,
        };
        log::debug!("Picked {} for {:?}", orrery.get_body(id).name(), purpose);

        match purpose {
            PickPurpose::CameraTarget => rig.set_target(self.state.target_cam, Some(id)),
            PickPurpose::RotationTarget => self.state.rotation_target = Some(id),
            PickPurpose::ScalingTarget => self.state.scaling_target = Some(id),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
