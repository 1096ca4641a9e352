use std::io::{BufWriter, Write};
use std::path::Path;

use crate::adapters::pixel_format::rgba_to_rgb;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes frames as binary PPM images.
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
        let filepath = filepath.as_ref();
        let mut file = BufWriter::new(std::fs::File::create(filepath)?);

        write_ppm(&mut file, buffer)?;
        file.flush()?;

        tracing::info!(path = %filepath.display(), "wrote snapshot");

        Ok(())
    }
}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

/// PPM has no alpha channel, so the RGBA frame is flattened to RGB.
pub fn write_ppm(writer: &mut impl Write, buffer: &PixelBuffer) -> std::io::Result<()> {
    let frame_size = buffer.frame_size();

    // P6 means binary RGB, then width, height and max colour value
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", frame_size.width(), frame_size.height())?;
    writeln!(writer, "255")?;
    writer.write_all(&rgba_to_rgb(buffer.buffer()))?;

    Ok(())
}
