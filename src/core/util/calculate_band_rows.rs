use std::num::NonZeroU32;

/// A half-open range of frame rows, `start_row..end_row`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub start_row: u32,
    pub end_row: u32,
}

impl RowRange {
    #[must_use]
    pub fn len(&self) -> u32 {
        self.end_row - self.start_row
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row
    }
}

/// Splits rows `0..height` into `bands` contiguous ranges of
/// `height / bands` rows each. The last band always ends at `height` and so
/// absorbs the remainder; when `height < bands` the leading bands are empty.
#[must_use]
pub fn calculate_band_rows(height: u32, bands: NonZeroU32) -> Vec<RowRange> {
    let total_bands = bands.get();
    let band_height = height / total_bands;

    (0..total_bands)
        .map(|band_num| {
            let start_row = band_num * band_height;

            let end_row = if band_num == total_bands - 1 {
                height
            } else {
                (band_num + 1) * band_height
            };

            RowRange { start_row, end_row }
        })
        .collect()
}
