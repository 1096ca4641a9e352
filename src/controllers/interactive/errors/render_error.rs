use std::time::Duration;

use crate::controllers::interactive::errors::merge_error::MergeError;
use crate::core::actions::render_band::band::PassId;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render pass {pass_id} stalled after {waited:?}, bands {missing_bands:?} never arrived")]
    Stalled {
        pass_id: PassId,
        missing_bands: Vec<usize>,
        waited: Duration,
    },
    #[error("render pass {pass_id} failed to merge a band")]
    Merge {
        pass_id: PassId,
        #[source]
        source: MergeError,
    },
    #[error("render pass {pass_id} was dropped before it completed")]
    Abandoned { pass_id: PassId },
}

impl RenderError {
    #[must_use]
    pub fn pass_id(&self) -> PassId {
        match self {
            RenderError::Stalled { pass_id, .. }
            | RenderError::Merge { pass_id, .. }
            | RenderError::Abandoned { pass_id } => *pass_id,
        }
    }
}
