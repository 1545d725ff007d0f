use std::f32::consts::{FRAC_PI_2, TAU};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Result};
use kiss3d::camera::Camera;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};

use super::controller::Controller;
use super::renderers::CompoundRenderer;
use super::viewports::CameraRig;
use crate::config::Config;
use crate::model::orrery::{BodyID, Orrery};
use crate::model::solar_system::{self, Material, SATURN, SATURN_RING_RADII};
use crate::model::AppState;

const STARFIELD_RADIUS: f32 = 600.0;
const INITIAL_CAMERA_DISTANCE: f32 = 150.0;

const FLEET_SIZE: usize = 10;
const FLEET_CUBE_SIZE: f32 = 1.5;
const FLEET_ORBIT_RADIUS: f32 = 115.0;
const FLEET_ALTITUDE: f32 = 12.0;
/// Radians per simulated day.
const FLEET_SPEED: f64 = 0.02;

const RING_COLOR: [f32; 3] = [0.85, 0.78, 0.6];
const ROTATION_TARGET_COLOR: [f32; 3] = [0.3, 1.0, 0.3];
const SCALING_TARGET_COLOR: [f32; 3] = [0.3, 0.6, 1.0];
const HOVER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

fn color(c: [f32; 3]) -> Point3<f32> {
    Point3::new(c[0], c[1], c[2])
}

pub struct View {
    // Object state
    orrery: Orrery,
    materials: Vec<Material>,
    time: f64,
    body_spheres: Vec<SceneNode>,
    // Effects
    stars: Option<SceneNode>,
    fleet: Vec<SceneNode>,
    flagship: Option<SceneNode>,
    fleet_angle: f64,
    // Camera
    rig: CameraRig,
    // Misc
    renderer: CompoundRenderer,
}

/// Kiss3d panics on unreadable assets, so check up front.
fn checked_asset(path: &Path) -> Result<&Path> {
    ensure!(path.is_file(), "asset {} not found", path.display());
    Ok(path)
}

fn apply_texture(node: &mut SceneNode, path: &Path) -> Result<()> {
    let path = checked_asset(path)?;
    node.set_texture_from_file(path, &path.display().to_string());
    Ok(())
}

impl View {
    pub fn new(orrery: Orrery, window: &mut Window, config: &Config) -> Self {
        // The Sun is the only light source
        window.set_light(Light::Absolute(Point3::origin()));
        window.set_background_color(0.0, 0.0, 0.0);

        let materials = solar_system::materials();

        let body_spheres = orrery
            .bodies()
            .map(|(_, body)| {
                let mut sphere = window.add_sphere(body.radius() as f32);
                let fallback = &materials[body.material_id()].color;
                sphere.set_color(fallback.x, fallback.y, fallback.z);
                if let Some(path) = body.texture() {
                    match apply_texture(&mut sphere, path) {
                        Ok(()) => log::debug!("Textured {}", body.name()),
                        Err(e) => log::warn!("{}: {}, using plain colour", body.name(), e),
                    }
                }
                sphere
            })
            .collect();

        let stars = Self::create_starfield(window, &config.assets);
        let (fleet, flagship) = Self::create_fleet(window, &config.assets);

        let rig = CameraRig::new(
            config.cameras,
            config.width,
            config.height,
            INITIAL_CAMERA_DISTANCE,
        );

        let mut view = Self {
            orrery,
            materials,
            time: 0.0,
            body_spheres,
            stars,
            fleet,
            flagship,
            fleet_angle: 0.0,
            rig,
            renderer: CompoundRenderer::new(),
        };
        view.update_scene_objects();
        view
    }

    fn create_starfield(window: &mut Window, assets: &Path) -> Option<SceneNode> {
        let mut stars = window.add_sphere(STARFIELD_RADIUS);
        // We look at it from the inside
        stars.enable_backface_culling(false);
        match apply_texture(&mut stars, &assets.join("textures").join("stars.jpg")) {
            Ok(()) => Some(stars),
            Err(e) => {
                log::warn!("No starfield: {}", e);
                window.remove_node(&mut stars);
                None
            }
        }
    }

    fn create_fleet(window: &mut Window, assets: &Path) -> (Vec<SceneNode>, Option<SceneNode>) {
        let cube_texture: PathBuf = assets.join("textures").join("borg.png");
        let textured = checked_asset(&cube_texture).is_ok();
        if !textured {
            log::warn!(
                "asset {} not found, fleet will be untextured",
                cube_texture.display()
            );
        }

        let fleet = (0..FLEET_SIZE)
            .map(|_| {
                let mut cube = window.add_cube(FLEET_CUBE_SIZE, FLEET_CUBE_SIZE, FLEET_CUBE_SIZE);
                cube.set_color(0.3, 0.35, 0.3);
                if textured {
                    cube.set_texture_from_file(&cube_texture, "borg");
                }
                cube.set_visible(false);
                cube
            })
            .collect();

        let model_dir = assets.join("models");
        let flagship = match checked_asset(&model_dir.join("enterprise.obj")) {
            Ok(path) => {
                let mut model = window.add_obj(path, &model_dir, Vector3::repeat(0.05));
                model.set_visible(false);
                log::info!("Loaded model {}", path.display());
                Some(model)
            }
            Err(e) => {
                log::warn!("No flagship: {}", e);
                None
            }
        };

        (fleet, flagship)
    }

    /// Both halves the controller is allowed to change.
    pub fn parts_mut(&mut self) -> (&mut Orrery, &mut CameraRig) {
        (&mut self.orrery, &mut self.rig)
    }

    pub fn update_state_by(&mut self, state: &AppState, timestep: f64) {
        self.orrery.update(state, timestep);
        if !state.full_stop {
            self.time += timestep;
            self.fleet_angle = (self.fleet_angle + FLEET_SPEED * timestep) % std::f64::consts::TAU;
        }
        self.update_scene_objects();
    }

    fn update_scene_objects(&mut self) {
        // kiss3d spheres have their poles on y; ours spin about z
        let pole_fix = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);

        for ((_, body), sphere) in self.orrery.bodies().zip(self.body_spheres.iter_mut()) {
            let position: Point3<f32> = nalgebra::convert(body.position());
            let orientation: UnitQuaternion<f32> = nalgebra::convert(body.orientation());
            let scale = body.size_factor() as f32;
            sphere.set_local_translation(Translation3::from(position.coords));
            sphere.set_local_rotation(orientation * pole_fix);
            sphere.set_local_scale(scale, scale, scale);
        }

        let base_angle = self.fleet_angle as f32;
        for (i, cube) in self.fleet.iter_mut().enumerate() {
            let angle = base_angle + TAU * i as f32 / FLEET_SIZE as f32;
            cube.set_local_translation(Self::fleet_slot(angle));
            cube.set_local_rotation(UnitQuaternion::from_euler_angles(angle, 2.0 * angle, 0.0));
        }
        if let Some(flagship) = self.flagship.as_mut() {
            // Trails the first cube, facing along its orbit
            let angle = base_angle - 0.15;
            flagship.set_local_translation(Self::fleet_slot(angle));
            flagship.set_local_rotation(UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle));
        }
    }

    fn fleet_slot(angle: f32) -> Translation3<f32> {
        Translation3::new(
            FLEET_ORBIT_RADIUS * angle.cos(),
            FLEET_ORBIT_RADIUS * angle.sin(),
            FLEET_ALTITUDE,
        )
    }

    fn body_position(&self, id: BodyID) -> Point3<f32> {
        nalgebra::convert(self.orrery.get_body(id).position())
    }

    fn follow_targets(&mut self) {
        for cam in 0..self.rig.camera_count() {
            let (target, min_dist) = match self.rig.target(cam) {
                Some(id) => (
                    self.body_position(id),
                    2.0 * self.orrery.get_body(id).apparent_radius() as f32,
                ),
                None => (Point3::origin(), 1.0),
            };
            let camera = self.rig.camera_mut(cam);
            camera.set_target(target);
            camera.set_min_distance(min_dist);
        }
    }

    // the big boy
    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        let state = controller.state();
        self.follow_targets();

        if let Some(stars) = self.stars.as_mut() {
            stars.set_visible(state.draw_stars);
        }
        for cube in self.fleet.iter_mut() {
            cube.set_visible(state.draw_fleet);
        }
        if let Some(flagship) = self.flagship.as_mut() {
            flagship.set_visible(state.draw_fleet);
        }

        if state.draw_orbits {
            self.draw_orbits();
        }
        if state.saturn_ring {
            self.draw_saturn_ring();
        }
        self.draw_highlights(state);

        if state.info_text {
            let default_font = kiss3d::text::Font::default();
            let text_color = Point3::new(1.0, 1.0, 1.0);
            window.draw_text(
                &self.info_text(controller),
                &Point2::origin(),
                40.0,
                &default_font,
                &text_color,
            );
        }
    }

    fn draw_orbits(&mut self) {
        for (_, body) in self.orrery.bodies() {
            if !body.is_orbiting() {
                continue;
            }
            let anchor = body
                .parent()
                .map(|id| self.orrery.get_body(id).position())
                .unwrap_or_else(Point3::origin);
            let center: Point3<f32> = nalgebra::convert(anchor + body.orbit_center());
            let color = self.materials[body.material_id()].color * 0.4;
            self.renderer
                .draw_orbit(center, body.orbit_radius() as f32, color);
        }
    }

    fn draw_saturn_ring(&mut self) {
        let saturn = self.orrery.get_body(SATURN);
        let center = self.body_position(SATURN);
        let orientation = nalgebra::convert(saturn.orientation());
        let radius = saturn.apparent_radius() as f32;
        let (inner, outer) = SATURN_RING_RADII;
        self.renderer.draw_ring(
            center,
            orientation,
            (inner as f32 * radius, outer as f32 * radius),
            color(RING_COLOR),
        );
    }

    fn draw_highlights(&mut self, state: &AppState) {
        let marks = [
            (state.rotation_target, ROTATION_TARGET_COLOR),
            (state.scaling_target, SCALING_TARGET_COLOR),
            (state.hovered, HOVER_COLOR),
        ];
        for (target, c) in marks.iter() {
            if let Some(id) = *target {
                let center = self.body_position(id);
                let radius = self.orrery.get_body(id).apparent_radius() as f32;
                self.renderer.draw_highlight(center, radius, color(*c));
            }
        }
    }

    fn body_name(&self, id: Option<BodyID>) -> &str {
        id.map(|id| self.orrery.get_body(id).name())
            .unwrap_or("-")
    }

    fn info_text(&self, controller: &Controller) -> String {
        let state = controller.state();
        let targets: Vec<String> = (0..self.rig.camera_count())
            .map(|cam| {
                let marker = if cam == state.target_cam { "*" } else { " " };
                format!("{}cam {}: {}", marker, cam + 1, self.body_name(self.rig.target(cam)))
            })
            .collect();

        let mut text = format!(
            "{}

Day {:.1}  ({:.3} days/frame){}
FPS: {:.0}
{}
Rotation target: {}
Scaling target: {}",
            controller.dialog().prompt(),
            self.time,
            controller.timestep(),
            if state.full_stop { "  STOPPED" } else { "" },
            controller.fps(),
            targets.join("\n"),
            self.body_name(state.rotation_target),
            self.body_name(state.scaling_target),
        );
        if state.mouse_picking {
            text.push_str(&format!("\nUnder cursor: {}", self.body_name(state.hovered)));
        }
        text
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.rig), None, Some(&mut self.renderer), None)
    }
}
