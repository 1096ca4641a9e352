use crate::core::data::frame_size::FrameSize;
use crate::core::data::viewport::Viewport;

/// A snapshot of everything one render pass needs. Later changes to the
/// controller's view state do not affect a pass already dispatched.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderRequest {
    pub frame_size: FrameSize,
    pub viewport: Viewport,
    pub max_iterations: u32,
}
