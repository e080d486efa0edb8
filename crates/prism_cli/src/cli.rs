use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{RenderConfig, RenderMode};

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Preset scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Wooden room with a framed mirror and ceiling lamps
    Final,
    /// Floor, back wall and three spheres (diffuse, mirror, glass)
    Base,
}

/// Camera placement presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CameraView {
    #[value(alias = "frontal")]
    Front,
    #[value(alias = "superior")]
    Top,
    #[value(alias = "lateral")]
    Side,
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Final,
    Normals,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Final => RenderMode::Final,
            Mode::Normals => RenderMode::Normals,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A Whitted-style ray tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 450, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub spp: u32,

    /// Maximum recursion depth
    #[arg(long, default_value_t = 6)]
    pub max_depth: u32,

    /// Scene to render
    #[arg(long, value_enum, ignore_case = true, default_value = "final")]
    pub scene: SceneKind,

    /// Output path (.ppm, .png; anything else is written as <path>.ppm)
    #[arg(long, default_value = "img/output.ppm")]
    pub out: PathBuf,

    /// Camera preset
    #[arg(long, value_enum, ignore_case = true, default_value = "front")]
    pub camera: CameraView,

    /// Shading mode
    #[arg(long, value_enum, ignore_case = true, default_value = "final")]
    pub mode: Mode,

    /// Seed for pixel jitter, for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write linear values without gamma correction
    #[arg(long)]
    pub no_gamma: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings selected by these arguments.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_resolution(self.width, self.height)
            .with_quality(self.spp, self.max_depth)
            .with_mode(self.mode.into())
            .with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["prism"]).unwrap();
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 450);
        assert_eq!(args.spp, 1);
        assert_eq!(args.max_depth, 6);
        assert_eq!(args.scene, SceneKind::Final);
        assert_eq!(args.out, PathBuf::from("img/output.ppm"));
        assert_eq!(args.camera, CameraView::Front);
        assert_eq!(args.mode, Mode::Final);
        assert_eq!(args.seed, None);
        assert!(!args.no_gamma);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "prism", "--width", "320", "--height", "240", "--spp", "8", "--max-depth", "10",
            "--scene", "base", "--out", "shots/a.png", "--camera", "side", "--mode", "normals",
            "--seed", "99", "--no-gamma", "--log-level", "debug",
        ])
        .unwrap();

        assert_eq!((args.width, args.height), (320, 240));
        assert_eq!(args.scene, SceneKind::Base);
        assert_eq!(args.camera, CameraView::Side);
        assert!(args.no_gamma);

        let config = args.render_config();
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.mode, RenderMode::Normals);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_camera_aliases() {
        for (name, view) in [
            ("frontal", CameraView::Front),
            ("superior", CameraView::Top),
            ("lateral", CameraView::Side),
            ("TOP", CameraView::Top),
        ] {
            let args = Args::try_parse_from(["prism", "--camera", name]).unwrap();
            assert_eq!(args.camera, view);
        }
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = Args::try_parse_from(["prism", "--width", "wide"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ValueValidation | ErrorKind::InvalidValue
        ));
    }

    #[test]
    fn test_rejects_zero_samples() {
        assert!(Args::try_parse_from(["prism", "--spp", "0"]).is_err());
        assert!(Args::try_parse_from(["prism", "--height", "0"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_scene() {
        let err = Args::try_parse_from(["prism", "--scene", "cornell"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
