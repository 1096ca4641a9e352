mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod logging;
pub mod presenters;

pub use crate::controllers::interactive::{
    CompletionNotifier, FrameData, InteractionController, InteractionSettings, NoopNotifier,
    RenderError, RenderEvent, RenderPort, RenderRequest, SchedulerConfig, SchedulerError,
    TileScheduler, WheelDirection,
};
pub use crate::controllers::snapshot::{SnapshotController, SnapshotError};
pub use crate::core::actions::render_band::band::{BandResult, BandTask, PassId};
pub use crate::core::actions::render_band::render_band::render_band;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::frame_size::{FrameSize, FrameSizeError};
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::fractals::mandelbrot::algorithm::{escape_time, iterate};
pub use crate::core::fractals::mandelbrot::colour_map::colour_for;
pub use crate::core::fractals::mandelbrot::errors::RenderConfigError;
pub use crate::core::fractals::mandelbrot::render_config::RenderConfig;
pub use crate::core::util::calculate_band_rows::{RowRange, calculate_band_rows};
#[cfg(feature = "gui")]
pub use crate::input::gui::{GuiError, run_gui};
pub use crate::presenters::file::ppm::PpmFilePresenter;
