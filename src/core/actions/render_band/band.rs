use std::fmt;

use crate::core::data::frame_size::FrameSize;
use crate::core::data::viewport::Viewport;
use crate::core::util::calculate_band_rows::RowRange;

/// Identifies one render pass. Ids increase monotonically per scheduler.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(pub u64);

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a worker needs to render one horizontal slice of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandTask {
    pub pass_id: PassId,
    pub index: usize,
    pub rows: RowRange,
    pub frame_size: FrameSize,
    pub viewport: Viewport,
    pub max_iterations: u32,
}

/// Packed RGBA rows produced for a [`BandTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandResult {
    pub pass_id: PassId,
    pub index: usize,
    pub start_row: u32,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}
