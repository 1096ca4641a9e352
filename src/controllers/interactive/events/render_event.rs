use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::core::actions::render_band::band::PassId;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Frame(FrameData),
    Error(RenderError),
}

impl RenderEvent {
    #[must_use]
    pub fn pass_id(&self) -> PassId {
        match self {
            RenderEvent::Frame(frame) => frame.pass_id,
            RenderEvent::Error(error) => error.pass_id(),
        }
    }
}
