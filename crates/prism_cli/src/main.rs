use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

mod cli;
mod logger;
mod scenes;

use cli::Args;
use logger::init_logger;
use prism_core::write_image;
use prism_renderer::render;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("Starting Prism");

    let config = args.render_config();
    let (scene, camera) = scenes::build_scene(args.scene, args.camera, config.aspect_ratio());
    info!(
        "Scene {:?} ({} primitives, {} lights), {:?} camera",
        args.scene,
        scene.len(),
        scene.lights().len(),
        args.camera
    );

    let image = render(&camera, &scene, &config);

    let written = write_image(&args.out, image.width, image.height, image.pixels(), !args.no_gamma)
        .map_err(|err| {
            error!("Could not write image: {err}");
            err
        })
        .with_context(|| format!("failed to write image to {}", args.out.display()))?;

    info!("Done: {}", written.display());
    Ok(())
}
