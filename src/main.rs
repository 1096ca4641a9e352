use anyhow::Context;
use mandelbrot_explorer::{
    FrameSize, PpmFilePresenter, RenderConfig, SchedulerConfig, SnapshotController,
};

const OUTPUT_DIR: &str = "output";
const OUTPUT_PATH: &str = "output/mandelbrot.ppm";

fn main() -> anyhow::Result<()> {
    mandelbrot_explorer::logging::init_logging();

    let mut controller = SnapshotController::new(PpmFilePresenter::new(), SchedulerConfig::default())
        .context("failed to start renderer")?;
    let request = SnapshotController::<PpmFilePresenter>::default_request(
        FrameSize::new(800, 600)?,
        RenderConfig::default(),
    )?;

    controller.generate(request).context("failed to render snapshot")?;

    std::fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("failed to create {OUTPUT_DIR}"))?;
    controller
        .write(OUTPUT_PATH)
        .with_context(|| format!("failed to write {OUTPUT_PATH}"))?;

    Ok(())
}
