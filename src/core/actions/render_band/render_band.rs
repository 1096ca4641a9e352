use crate::core::actions::render_band::band::{BandResult, BandTask};
use crate::core::fractals::mandelbrot::algorithm::escape_time;
use crate::core::fractals::mandelbrot::colour_map::colour_for;

/// Renders every pixel in the task's rows and returns them packed as
/// `width * 4 * rows` RGBA bytes, row-major.
///
/// Points that never escape are coloured as one past the bound, which the
/// ramp maps to black.
#[must_use]
pub fn render_band(task: &BandTask) -> BandResult {
    let frame_size = task.frame_size;
    let bounded = task.max_iterations.saturating_add(1);
    let width = frame_size.width();
    let mut bytes = Vec::with_capacity(frame_size.row_stride() * task.rows.len() as usize);

    for py in task.rows.start_row..task.rows.end_row {
        let cy = task.viewport.plane_y(py, frame_size);

        for px in 0..width {
            let cx = task.viewport.plane_x(px, frame_size);
            let iterations = escape_time(cx, cy, task.max_iterations).unwrap_or(bounded);

            bytes.extend_from_slice(&colour_for(iterations, task.max_iterations).to_rgba());
        }
    }

    BandResult {
        pass_id: task.pass_id,
        index: task.index,
        start_row: task.rows.start_row,
        width,
        height: frame_size.height(),
        bytes,
    }
}
