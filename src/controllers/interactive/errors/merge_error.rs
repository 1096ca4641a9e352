use crate::core::actions::render_band::band::PassId;
use crate::core::data::pixel_buffer::PixelBufferError;
use crate::core::util::calculate_band_rows::RowRange;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("band result for pass {actual} offered to pass {expected}")]
    WrongPass { expected: PassId, actual: PassId },
    #[error("band {index} is not part of this pass")]
    UnknownBand { index: usize },
    #[error("band {index} was already merged")]
    DuplicateBand { index: usize },
    #[error(
        "band {index} covers rows {}..{} but returned {bytes} bytes starting at row {start_row}",
        .expected.start_row, .expected.end_row
    )]
    UnexpectedRows {
        index: usize,
        expected: RowRange,
        start_row: u32,
        bytes: usize,
    },
    #[error(transparent)]
    Buffer(#[from] PixelBufferError),
}
