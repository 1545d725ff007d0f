use clap::Parser;
use kiss3d::window::Window;

use orrery_viz::config::{Config, FRAMES_PER_SECOND};
use orrery_viz::gui::Simulation;
use orrery_viz::model::solar_system;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    anyhow::ensure!(
        config.time_scale.is_finite(),
        "time scale must be a finite number of days per second"
    );
    if !config.assets.is_dir() {
        log::warn!(
            "Asset directory {} is missing; everything will be untextured",
            config.assets.display()
        );
    }

    let mut window = Window::new_with_size("Solar System", config.width, config.height);
    window.set_framerate_limit(Some(FRAMES_PER_SECOND));

    let orrery = solar_system::build(&config.assets);
    log::info!("Loaded {} bodies", orrery.len());

    let simulation = Simulation::new(orrery, &mut window, &config);
    window.render_loop(simulation);
    Ok(())
}
