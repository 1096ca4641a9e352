use std::time::{Duration, Instant};

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::merge_error::MergeError;
use crate::core::actions::render_band::band::{BandResult, PassId};
use crate::core::data::frame_size::FrameSize;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::util::calculate_band_rows::RowRange;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PassState {
    Dispatched,
    Merging { merged: usize, total: usize },
    Complete,
}

/// Collects the bands of one frame into a buffer owned by the pass.
///
/// A band only counts towards completion once all of its bytes have been
/// copied, so a complete pass never exposes a torn frame.
#[derive(Debug)]
pub struct RenderPass {
    id: PassId,
    bands: Vec<RowRange>,
    merged: Vec<bool>,
    merged_count: usize,
    buffer: PixelBuffer,
    dispatched_at: Instant,
}

impl RenderPass {
    #[must_use]
    pub fn new(
        id: PassId,
        frame_size: FrameSize,
        bands: Vec<RowRange>,
        dispatched_at: Instant,
    ) -> Self {
        Self {
            id,
            merged: vec![false; bands.len()],
            bands,
            merged_count: 0,
            buffer: PixelBuffer::new(frame_size),
            dispatched_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> PassId {
        self.id
    }

    #[must_use]
    pub fn bands(&self) -> &[RowRange] {
        &self.bands
    }

    #[must_use]
    pub fn dispatched_at(&self) -> Instant {
        self.dispatched_at
    }

    #[must_use]
    pub fn state(&self) -> PassState {
        if self.merged_count == self.bands.len() {
            PassState::Complete
        } else if self.merged_count == 0 {
            PassState::Dispatched
        } else {
            PassState::Merging {
                merged: self.merged_count,
                total: self.bands.len(),
            }
        }
    }

    pub fn merge(&mut self, result: &BandResult) -> Result<PassState, MergeError> {
        if result.pass_id != self.id {
            return Err(MergeError::WrongPass {
                expected: self.id,
                actual: result.pass_id,
            });
        }

        let index = result.index;
        let Some(&expected) = self.bands.get(index) else {
            return Err(MergeError::UnknownBand { index });
        };

        if self.merged[index] {
            return Err(MergeError::DuplicateBand { index });
        }

        let expected_bytes = expected.len() as usize * self.buffer.frame_size().row_stride();
        if result.start_row != expected.start_row || result.bytes.len() != expected_bytes {
            return Err(MergeError::UnexpectedRows {
                index,
                expected,
                start_row: result.start_row,
                bytes: result.bytes.len(),
            });
        }

        self.buffer
            .write_rows(result.start_row, result.width, &result.bytes)?;

        self.merged[index] = true;
        self.merged_count += 1;

        Ok(self.state())
    }

    /// Indices of the bands that have not been merged yet, in partition order.
    #[must_use]
    pub fn missing_bands(&self) -> Vec<usize> {
        self.merged
            .iter()
            .enumerate()
            .filter(|(_, merged)| !**merged)
            .map(|(index, _)| index)
            .collect()
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.dispatched_at)
    }

    #[must_use]
    pub fn into_frame(self, now: Instant) -> FrameData {
        FrameData {
            pass_id: self.id,
            render_duration: self.elapsed(now),
            pixel_buffer: self.buffer,
        }
    }
}
