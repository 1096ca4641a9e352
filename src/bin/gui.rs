use mandelbrot_explorer::SchedulerConfig;

fn main() -> anyhow::Result<()> {
    mandelbrot_explorer::logging::init_logging();

    mandelbrot_explorer::run_gui(SchedulerConfig::default())?;

    Ok(())
}
