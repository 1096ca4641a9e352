use crate::core::data::point::Point;

/// Smallest extent on either axis for which the pixel-to-plane mapping is defined.
pub const MIN_FRAME_EXTENT: u32 = 2;

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameSizeError {
    #[error("frame size must be at least {min}x{min} pixels: {width}x{height}", min = MIN_FRAME_EXTENT)]
    TooSmall { width: u32, height: u32 },
}

/// Pixel dimensions of a frame. Both axes are at least [`MIN_FRAME_EXTENT`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameSize {
    width: u32,
    height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self, FrameSizeError> {
        if width < MIN_FRAME_EXTENT || height < MIN_FRAME_EXTENT {
            return Err(FrameSizeError::TooSmall { width, height });
        }

        Ok(Self { width, height })
    }

    /// Like [`FrameSize::new`], but raises undersized axes to the minimum
    /// instead of failing. Used for window sizes, which may legitimately be
    /// zero while minimised.
    #[must_use]
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_FRAME_EXTENT),
            height: height.max(MIN_FRAME_EXTENT),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Display aspect as `height / width`.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn row_stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Size in bytes of an RGBA buffer covering the whole frame.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * 4
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }
}
