use crate::core::data::complex::Complex;
use crate::core::data::frame_size::FrameSize;

/// Span multiplier applied by a single zoom-in step.
pub const ZOOM_IN_RATIO: f64 = 0.90;
/// Span multiplier applied by a single zoom-out step.
pub const ZOOM_OUT_RATIO: f64 = 1.10;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    #[error("viewport bounds must be finite: x [{x_from}, {x_to}], y [{y_from}, {y_to}]")]
    NonFiniteBounds {
        x_from: f64,
        x_to: f64,
        y_from: f64,
        y_to: f64,
    },
    #[error("viewport size must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("display aspect ratio must be finite and positive: {0}")]
    InvalidAspectRatio(f64),
}

/// The rectangle of the complex plane currently mapped onto the full frame.
///
/// `x` runs along the real axis, `y` along the imaginary axis, and pixel row
/// zero maps to `y_from`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    x_from: f64,
    x_to: f64,
    y_from: f64,
    y_to: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_from: -2.0,
            x_to: 1.0,
            y_from: -1.0,
            y_to: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(x_from: f64, x_to: f64, y_from: f64, y_to: f64) -> Result<Self, ViewportError> {
        if ![x_from, x_to, y_from, y_to].iter().all(|v| v.is_finite()) {
            return Err(ViewportError::NonFiniteBounds {
                x_from,
                x_to,
                y_from,
                y_to,
            });
        }

        let width = x_to - x_from;
        let height = y_to - y_from;

        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::InvalidSize { width, height });
        }

        Ok(Self {
            x_from,
            x_to,
            y_from,
            y_to,
        })
    }

    #[must_use]
    pub fn x_from(&self) -> f64 {
        self.x_from
    }

    #[must_use]
    pub fn x_to(&self) -> f64 {
        self.x_to
    }

    #[must_use]
    pub fn y_from(&self) -> f64 {
        self.y_from
    }

    #[must_use]
    pub fn y_to(&self) -> f64 {
        self.y_to
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_to - self.x_from
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_to - self.y_from
    }

    /// Moves the view by a drag distance expressed as fractions of the display
    /// extent. The rectangle moves opposite to the drag so the content under
    /// the pointer follows it.
    pub fn pan(&mut self, delta_x_fraction: f64, delta_y_fraction: f64) {
        let dx = self.width() * delta_x_fraction;
        let dy = self.height() * delta_y_fraction;

        self.x_from -= dx;
        self.x_to -= dx;
        self.y_from -= dy;
        self.y_to -= dy;
    }

    /// Shrinks both spans by [`ZOOM_IN_RATIO`], keeping the point at the
    /// focal fractions (0..1 within the current rectangle) in place.
    pub fn zoom_in(&mut self, focal_fraction_x: f64, focal_fraction_y: f64) {
        self.scale_x_about(ZOOM_IN_RATIO, focal_fraction_x);
        self.scale_y_about(ZOOM_IN_RATIO, focal_fraction_y);
    }

    /// Grows the horizontal span by [`ZOOM_OUT_RATIO`] around the focal x,
    /// then re-derives the vertical span from `display_aspect`. Unlike
    /// [`Viewport::zoom_in`], the vertical axis is recentred on its midpoint
    /// rather than anchored at the pointer.
    pub fn zoom_out(
        &mut self,
        focal_fraction_x: f64,
        display_aspect: f64,
    ) -> Result<(), ViewportError> {
        check_aspect(display_aspect)?;

        self.scale_x_about(ZOOM_OUT_RATIO, focal_fraction_x);
        self.apply_aspect_ratio(display_aspect)
    }

    /// Recomputes the vertical span as `width * display_aspect`
    /// (`display_aspect = display height / display width`), growing or
    /// shrinking symmetrically around the vertical midpoint.
    pub fn apply_aspect_ratio(&mut self, display_aspect: f64) -> Result<(), ViewportError> {
        check_aspect(display_aspect)?;

        let old_height = self.height();
        let new_height = self.width() * display_aspect;
        let half_delta = (new_height - old_height) / 2.0;

        self.y_from -= half_delta;
        self.y_to += half_delta;

        Ok(())
    }

    /// Maps a pixel to its plane coordinate. Pixel `0` maps to the lower bound
    /// and pixel `extent - 1` to the upper bound on each axis.
    #[must_use]
    pub fn pixel_to_plane(&self, px: u32, py: u32, frame: FrameSize) -> Complex {
        Complex {
            real: self.plane_x(px, frame),
            imag: self.plane_y(py, frame),
        }
    }

    #[inline]
    #[must_use]
    pub fn plane_x(&self, px: u32, frame: FrameSize) -> f64 {
        self.x_from + self.width() * f64::from(px) / f64::from(frame.width() - 1)
    }

    #[inline]
    #[must_use]
    pub fn plane_y(&self, py: u32, frame: FrameSize) -> f64 {
        self.y_from + self.height() * f64::from(py) / f64::from(frame.height() - 1)
    }

    fn scale_x_about(&mut self, ratio: f64, focal_fraction: f64) {
        let delta = self.width() * ratio - self.width();

        self.x_from -= delta * focal_fraction;
        self.x_to += delta * (1.0 - focal_fraction);
    }

    fn scale_y_about(&mut self, ratio: f64, focal_fraction: f64) {
        let delta = self.height() * ratio - self.height();

        self.y_from -= delta * focal_fraction;
        self.y_to += delta * (1.0 - focal_fraction);
    }
}

fn check_aspect(display_aspect: f64) -> Result<(), ViewportError> {
    if !display_aspect.is_finite() || display_aspect <= 0.0 {
        return Err(ViewportError::InvalidAspectRatio(display_aspect));
    }

    Ok(())
}
