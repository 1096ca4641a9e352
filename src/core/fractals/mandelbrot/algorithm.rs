/// Squared escape radius: an orbit with `|z|^2 > 4` is unbounded.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Counts the iterations of `z = z^2 + c` (from `z = 0`) performed before the
/// orbit leaves the escape radius, up to `max_iterations`.
///
/// A point that never escapes returns exactly `max_iterations`. Once the bound
/// exceeds a point's escape count, raising it further does not change the
/// result.
#[inline]
#[must_use]
pub fn iterate(cx: f64, cy: f64, max_iterations: u32) -> u32 {
    escape_time(cx, cy, max_iterations).unwrap_or(max_iterations)
}

/// Like [`iterate`], but tells a bounded orbit apart from one that escapes on
/// the last step: `Some(n)` when `z_n` is the first point outside the radius,
/// `None` when the orbit is still inside after `max_iterations` steps.
#[inline]
#[must_use]
pub fn escape_time(cx: f64, cy: f64, max_iterations: u32) -> Option<u32> {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;

    for step in 0..max_iterations {
        let xx = x * x;
        let yy = y * y;

        if xx + yy > ESCAPE_RADIUS_SQUARED {
            return Some(step);
        }

        let xy = x * y;
        x = xx - yy + cx;
        y = xy + xy + cy;
    }

    (x * x + y * y > ESCAPE_RADIUS_SQUARED).then_some(max_iterations)
}
