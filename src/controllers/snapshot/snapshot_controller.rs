use std::path::Path;

use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::tile_scheduler::{
    SchedulerConfig, SchedulerError, TileScheduler,
};
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::render_config::RenderConfig;

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders single frames headlessly and hands them to a file presenter.
pub struct SnapshotController<P: FilePresenterPort> {
    presenter: P,
    scheduler: TileScheduler,
    buffer: Option<PixelBuffer>,
}

impl<P: FilePresenterPort> SnapshotController<P> {
    pub fn new(presenter: P, scheduler_config: SchedulerConfig) -> Result<Self, SnapshotError> {
        Ok(Self {
            presenter,
            scheduler: TileScheduler::new(scheduler_config)?,
            buffer: None,
        })
    }

    /// The default view fitted to `frame_size`.
    pub fn default_request(
        frame_size: FrameSize,
        render_config: RenderConfig,
    ) -> Result<RenderRequest, SnapshotError> {
        let mut viewport = Viewport::default();
        viewport.apply_aspect_ratio(frame_size.aspect_ratio())?;

        Ok(RenderRequest {
            frame_size,
            viewport,
            max_iterations: render_config.max_iterations(),
        })
    }

    pub fn generate(&mut self, request: RenderRequest) -> Result<(), SnapshotError> {
        tracing::info!(
            width = request.frame_size.width(),
            height = request.frame_size.height(),
            max_iterations = request.max_iterations,
            workers = self.scheduler.workers().get(),
            "rendering snapshot"
        );

        let frame = self.scheduler.render_blocking(request)?;

        tracing::info!(
            duration_ms = frame.render_duration.as_secs_f64() * 1000.0,
            "snapshot rendered"
        );

        self.buffer = Some(frame.pixel_buffer);

        Ok(())
    }

    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn write(&self, filepath: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let buffer = self.buffer.as_ref().ok_or(SnapshotError::NothingRendered)?;
        self.presenter.present(buffer, filepath)?;

        Ok(())
    }
}
