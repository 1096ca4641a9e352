use crate::core::actions::render_band::band::PassId;

/// Called from worker threads after each band result has been queued for the
/// coordinator.
pub trait CompletionNotifier: Send + Sync {
    fn band_completed(&self, pass_id: PassId);
}

#[derive(Debug, Default)]
pub struct NoopNotifier;

impl CompletionNotifier for NoopNotifier {
    fn band_completed(&self, _pass_id: PassId) {}
}
