use std::time::Instant;

use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::debounce::Debouncer;
use crate::controllers::interactive::ports::render_port::RenderPort;
use crate::controllers::interactive::settings::InteractionSettings;
use crate::controllers::interactive::state::{InteractionState, WheelDirection};
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::errors::RenderConfigError;
use crate::core::fractals::mandelbrot::render_config::RenderConfig;

/// Turns pointer, wheel and resize input into viewport changes and render
/// triggers.
///
/// The controller owns all view state and never blocks: renders go out through
/// the [`RenderPort`], and debounced renders fire from [`tick`] once their
/// deadline has passed. Callers that sleep between events should wake by
/// [`next_deadline`].
///
/// [`tick`]: InteractionController::tick
/// [`next_deadline`]: InteractionController::next_deadline
pub struct InteractionController<R: RenderPort> {
    viewport: Viewport,
    render_config: RenderConfig,
    frame_size: FrameSize,
    state: InteractionState,
    debounce: Debouncer,
    settings: InteractionSettings,
    render_port: R,
}

impl<R: RenderPort> InteractionController<R> {
    /// Starts from the default view fitted to `frame_size`. Nothing is
    /// rendered until the first input or an explicit [`render_now`].
    ///
    /// [`render_now`]: InteractionController::render_now
    pub fn new(frame_size: FrameSize, render_port: R) -> Self {
        let mut controller = Self {
            viewport: Viewport::default(),
            render_config: RenderConfig::default(),
            frame_size,
            state: InteractionState::default(),
            debounce: Debouncer::new(),
            settings: InteractionSettings::default(),
            render_port,
        };
        controller.fit_viewport_to_frame();

        controller
    }

    #[must_use]
    pub fn with_settings(mut self, settings: InteractionSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_render_config(mut self, render_config: RenderConfig) -> Self {
        self.render_config = render_config;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        self.render_config
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn render_port(&self) -> &R {
        &self.render_port
    }

    pub fn render_port_mut(&mut self) -> &mut R {
        &mut self.render_port
    }

    /// Picked up by the next render; does not render by itself.
    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), RenderConfigError> {
        self.render_config.set_max_iterations(max_iterations)
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.state.pointer = position;
    }

    pub fn pointer_pressed(&mut self, position: Point) {
        self.state.pointer = position;
        self.state.drag_origin = Some(position);
    }

    /// Ends a drag, pans by its length and renders straight away. Returns
    /// `false` if no drag was in progress.
    pub fn pointer_released(&mut self, position: Point) -> bool {
        self.state.pointer = position;

        let Some(origin) = self.state.drag_origin.take() else {
            return false;
        };

        let (dx, dy) = position.offset_from(origin);
        let dx_fraction = f64::from(dx) / f64::from(self.frame_size.width());
        let dy_fraction = f64::from(dy) / f64::from(self.frame_size.height());

        self.viewport.pan(dx_fraction, dy_fraction);
        tracing::debug!(dx, dy, viewport = ?self.viewport, "panned");

        self.render_now();

        true
    }

    /// The pointer left the display surface; any drag in progress is dropped.
    pub fn pointer_left(&mut self) {
        if self.state.drag_origin.take().is_some() {
            tracing::debug!("drag cancelled");
        }
    }

    pub fn wheel(&mut self, direction: WheelDirection, now: Instant) {
        let (fx, fy) = self.pointer_fraction();

        match direction {
            WheelDirection::Up => {
                self.viewport.zoom_in(fx, fy);
                tracing::debug!(fx, fy, viewport = ?self.viewport, "zoomed in");

                self.debounce.schedule(now, self.settings.zoom_in_debounce);
            }
            WheelDirection::Down => {
                match self.viewport.zoom_out(fx, self.frame_size.aspect_ratio()) {
                    Ok(()) => tracing::debug!(fx, viewport = ?self.viewport, "zoomed out"),
                    Err(error) => tracing::warn!(%error, "zoom out rejected"),
                }

                self.render_now();
                self.debounce.schedule(now, self.settings.zoom_out_debounce);
            }
        }
    }

    /// Adopts a new display size, refits the view and renders immediately.
    /// Degenerate sizes are raised to the 2x2 minimum.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame_size = FrameSize::clamped(width, height);
        self.fit_viewport_to_frame();

        tracing::debug!(
            width = self.frame_size.width(),
            height = self.frame_size.height(),
            "resized"
        );

        self.render_now();
    }

    /// Fires the pending debounced render if it is due. Returns whether a
    /// render was triggered.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.debounce.fire_if_due(now) {
            return false;
        }

        self.render_now();

        true
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    #[must_use]
    pub fn request(&self) -> RenderRequest {
        RenderRequest {
            frame_size: self.frame_size,
            viewport: self.viewport,
            max_iterations: self.render_config.max_iterations(),
        }
    }

    pub fn render_now(&mut self) {
        let request = self.request();
        self.render_port.render(request);
    }

    fn pointer_fraction(&self) -> (f64, f64) {
        let fx = f64::from(self.state.pointer.x) / f64::from(self.frame_size.width());
        let fy = f64::from(self.state.pointer.y) / f64::from(self.frame_size.height());

        (fx.clamp(0.0, 1.0), fy.clamp(0.0, 1.0))
    }

    fn fit_viewport_to_frame(&mut self) {
        if let Err(error) = self
            .viewport
            .apply_aspect_ratio(self.frame_size.aspect_ratio())
        {
            tracing::warn!(%error, "could not fit viewport to frame");
        }
    }
}
