use crate::core::fractals::mandelbrot::render_config::MAX_ITERATIONS_LIMIT;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderConfigError {
    #[error("maximum iterations {requested} exceeds the limit of {limit}", limit = MAX_ITERATIONS_LIMIT)]
    MaxIterationsOutOfRange { requested: u32 },
}
