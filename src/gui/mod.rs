use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::Config;
use crate::model::{AppState, Orrery};

pub mod camera;
pub mod controller;
pub mod dialog;
pub mod picking;
mod renderers;
pub mod view;
pub mod viewports;

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(orrery: Orrery, window: &mut Window, config: &Config) -> Self {
        let mut state = AppState::new();
        state.full_stop = config.paused;
        state.draw_stars = !config.no_stars;

        Self {
            view: View::new(orrery, window, config),
            controller: Controller::new(config.timestep(), state),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            let (orrery, rig) = self.view.parts_mut();
            self.controller.process_event(event, orrery, rig);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.view
            .update_state_by(self.controller.state(), self.controller.timestep());
        let (orrery, rig) = self.view.parts_mut();
        self.controller.refresh_hover(orrery, rig);
        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter();
    }
}
