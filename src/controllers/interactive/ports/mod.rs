//! Port definitions for the interactive controller.
//!
//! `RenderPort` is how the controller asks for frames; `CompletionNotifier`
//! is how the worker pool tells the outside world that results are waiting.

pub mod completion_notifier;
pub mod render_port;
