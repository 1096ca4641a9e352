use std::sync::{Mutex, PoisonError};

use winit::event_loop::EventLoopProxy;

use crate::controllers::interactive::ports::completion_notifier::CompletionNotifier;
use crate::core::actions::render_band::band::PassId;
use crate::input::gui::events::GuiEvent;

/// Wakes the window's event loop whenever a band lands, so finished passes
/// are collected without the loop having to spin.
pub struct EventLoopWaker {
    event_loop_proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl EventLoopWaker {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            event_loop_proxy: Mutex::new(event_loop_proxy),
        }
    }
}

impl CompletionNotifier for EventLoopWaker {
    fn band_completed(&self, _pass_id: PassId) {
        let proxy = self
            .event_loop_proxy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // The loop has already exited if this fails; nothing left to wake.
        let _ = proxy.send_event(GuiEvent::Wake);
    }
}
