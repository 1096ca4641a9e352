use std::time::Duration;

pub const ZOOM_IN_DEBOUNCE: Duration = Duration::from_millis(300);
pub const ZOOM_OUT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Timing knobs for wheel handling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InteractionSettings {
    /// Quiet period after the last wheel-up before the zoomed view renders.
    pub zoom_in_debounce: Duration,
    /// Delay of the follow-up render after a wheel-down; the first render is
    /// immediate.
    pub zoom_out_debounce: Duration,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            zoom_in_debounce: ZOOM_IN_DEBOUNCE,
            zoom_out_debounce: ZOOM_OUT_DEBOUNCE,
        }
    }
}
