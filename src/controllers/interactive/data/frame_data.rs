use std::time::Duration;

use crate::core::actions::render_band::band::PassId;
use crate::core::data::pixel_buffer::PixelBuffer;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    pub pass_id: PassId,
    pub pixel_buffer: PixelBuffer,
    pub render_duration: Duration,
}
