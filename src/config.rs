use std::path::PathBuf;

use clap::Parser;

/// Interactive solar-system viewer.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Directory holding `textures/` and `models/`
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Initial window width, in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height, in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Simulated days per real second
    #[arg(long, default_value_t = 2.0)]
    pub time_scale: f64,

    /// Number of camera viewports to start with
    #[arg(long, default_value_t = 1, value_parser = parse_camera_count)]
    pub cameras: usize,

    /// Start without the starfield
    #[arg(long)]
    pub no_stars: bool,

    /// Start with everything stopped
    #[arg(long)]
    pub paused: bool,
}

pub const FRAMES_PER_SECOND: u64 = 60;

impl Config {
    /// Simulated days advanced by each frame.
    pub fn timestep(&self) -> f64 {
        self.time_scale / FRAMES_PER_SECOND as f64
    }
}

fn parse_camera_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n @ (1 | 2 | 4)) => Ok(n),
        Ok(n) => Err(format!("{} cameras can't be laid out; use 1, 2 or 4", n)),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["solar-system"]).unwrap();
        assert_eq!(config.assets, PathBuf::from("assets"));
        assert_eq!(config.cameras, 1);
        assert!(!config.paused);
        approx::assert_relative_eq!(config.timestep(), 2.0 / 60.0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "solar-system",
            "--assets",
            "/tmp/data",
            "--cameras",
            "4",
            "--time-scale",
            "30",
            "--paused",
        ])
        .unwrap();
        assert_eq!(config.assets, PathBuf::from("/tmp/data"));
        assert_eq!(config.cameras, 4);
        assert!(config.paused);
        approx::assert_relative_eq!(config.timestep(), 0.5);
    }

    #[test]
    fn test_bad_camera_count() {
        assert!(Config::try_parse_from(["solar-system", "--cameras", "3"]).is_err());
        assert!(Config::try_parse_from(["solar-system", "--cameras", "x"]).is_err());
    }
}
