use crate::core::fractals::mandelbrot::errors::RenderConfigError;

pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
pub const MAX_ITERATIONS_LIMIT: u32 = 20_000;

/// Tunable render parameters, read by every pass at dispatch time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    max_iterations: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RenderConfig {
    pub fn new(max_iterations: u32) -> Result<Self, RenderConfigError> {
        let mut config = Self::default();
        config.set_max_iterations(max_iterations)?;

        Ok(config)
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), RenderConfigError> {
        if max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(RenderConfigError::MaxIterationsOutOfRange {
                requested: max_iterations,
            });
        }

        self.max_iterations = max_iterations;
        Ok(())
    }
}
