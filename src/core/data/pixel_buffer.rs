use crate::core::data::colour::Colour;
use crate::core::data::frame_size::FrameSize;
use crate::core::data::point::Point;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("pixel at x:{}, y:{} outside of {}x{} frame", .pixel.x, .pixel.y, .frame_size.width(), .frame_size.height())]
    PixelOutsideBounds { pixel: Point, frame_size: FrameSize },
    #[error("frame size {expected} bytes does not match buffer size {actual} bytes")]
    BoundsMismatch { expected: usize, actual: usize },
    #[error("row data of width {rows_width} cannot be merged into a frame of width {frame_width}")]
    WidthMismatch { frame_width: u32, rows_width: u32 },
    #[error("{len} bytes is not a whole number of {row_stride}-byte rows")]
    PartialRow { len: usize, row_stride: usize },
    #[error("rows {start_row}..{end_row} fall outside a frame of height {height}")]
    RowsOutOfBounds {
        start_row: u32,
        end_row: u64,
        height: u32,
    },
}

pub type PixelBufferData = Vec<u8>;

/// A row-major RGBA frame, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    frame_size: FrameSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    /// Creates a zeroed (transparent black) frame.
    #[must_use]
    pub fn new(frame_size: FrameSize) -> Self {
        Self {
            frame_size,
            buffer: vec![0; frame_size.byte_len()],
        }
    }

    pub fn from_data(
        frame_size: FrameSize,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        if frame_size.byte_len() != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected: frame_size.byte_len(),
                actual: buffer.len(),
            });
        }

        Ok(Self { frame_size, buffer })
    }

    #[must_use]
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Copies whole rows into the frame starting at `start_row`.
    ///
    /// The write lands at byte offset `start_row * width * 4`. Nothing is
    /// written unless the rows fit entirely inside the frame.
    pub fn write_rows(
        &mut self,
        start_row: u32,
        rows_width: u32,
        bytes: &[u8],
    ) -> Result<(), PixelBufferError> {
        if rows_width != self.frame_size.width() {
            return Err(PixelBufferError::WidthMismatch {
                frame_width: self.frame_size.width(),
                rows_width,
            });
        }

        let row_stride = self.frame_size.row_stride();
        if bytes.len() % row_stride != 0 {
            return Err(PixelBufferError::PartialRow {
                len: bytes.len(),
                row_stride,
            });
        }

        let rows = (bytes.len() / row_stride) as u64;
        let end_row = u64::from(start_row) + rows;
        if end_row > u64::from(self.frame_size.height()) {
            return Err(PixelBufferError::RowsOutOfBounds {
                start_row,
                end_row,
                height: self.frame_size.height(),
            });
        }

        let offset = start_row as usize * row_stride;
        self.buffer[offset..offset + bytes.len()].copy_from_slice(bytes);

        Ok(())
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
            a: self.buffer[index + 3],
        })
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.frame_size.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                frame_size: self.frame_size,
            });
        }

        Ok(pixel.y as usize * self.frame_size.row_stride() + pixel.x as usize * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> FrameSize {
        FrameSize::new(width, height).unwrap()
    }

    #[test]
    fn test_new_buffer_is_zeroed_rgba() {
        let buffer = PixelBuffer::new(frame(4, 3));

        assert_eq!(buffer.buffer_size(), 4 * 3 * 4);
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_checks_length() {
        let size = frame(2, 2);

        assert!(PixelBuffer::from_data(size, vec![0; 16]).is_ok());
        assert_eq!(
            PixelBuffer::from_data(size, vec![0; 12]),
            Err(PixelBufferError::BoundsMismatch {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_write_rows_lands_at_row_offset() {
        let mut buffer = PixelBuffer::new(frame(2, 3));
        let rows = vec![7u8; 2 * 4];

        buffer.write_rows(1, 2, &rows).unwrap();

        let data = buffer.buffer();
        assert!(data[..8].iter().all(|&b| b == 0));
        assert!(data[8..16].iter().all(|&b| b == 7));
        assert!(data[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_rows_accepts_empty_band() {
        let mut buffer = PixelBuffer::new(frame(2, 2));

        assert!(buffer.write_rows(2, 2, &[]).is_ok());
    }

    #[test]
    fn test_write_rows_rejects_overflow_without_writing() {
        let mut buffer = PixelBuffer::new(frame(2, 2));
        let rows = vec![9u8; 2 * 2 * 4];

        assert_eq!(
            buffer.write_rows(1, 2, &rows),
            Err(PixelBufferError::RowsOutOfBounds {
                start_row: 1,
                end_row: 3,
                height: 2
            })
        );
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_rows_rejects_wrong_width_and_partial_rows() {
        let mut buffer = PixelBuffer::new(frame(3, 2));

        assert_eq!(
            buffer.write_rows(0, 2, &[0; 8]),
            Err(PixelBufferError::WidthMismatch {
                frame_width: 3,
                rows_width: 2
            })
        );
        assert_eq!(
            buffer.write_rows(0, 3, &[0; 13]),
            Err(PixelBufferError::PartialRow {
                len: 13,
                row_stride: 12
            })
        );
    }

    #[test]
    fn test_pixel_reads_written_row() {
        let mut buffer = PixelBuffer::new(frame(3, 3));
        let mut row = vec![0; 12];
        row[8..12].copy_from_slice(&[10, 20, 30, 255]);

        buffer.write_rows(1, 3, &row).unwrap();

        assert_eq!(buffer.pixel(Point { x: 2, y: 1 }), Ok(Colour::opaque(10, 20, 30)));
        assert_eq!(buffer.pixel(Point { x: 2, y: 0 }), Ok(Colour::default()));
    }

    #[test]
    fn test_pixel_outside_bounds() {
        let size = frame(3, 3);
        let buffer = PixelBuffer::new(size);
        let pixel = Point { x: 3, y: 0 };

        assert_eq!(
            buffer.pixel(pixel),
            Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                frame_size: size
            })
        );
        assert!(buffer.pixel(Point { x: 0, y: -1 }).is_err());
    }
}
