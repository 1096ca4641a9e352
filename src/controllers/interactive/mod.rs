//! Interactive rendering: input handling on one side, banded rendering on
//! the other.
//!
//! The pieces follow the ports & adapters pattern:
//! - **Input**: `InteractionController` turns pointer, wheel and resize events
//!   into `RenderRequest`s sent through `RenderPort`
//! - **Rendering**: `TileScheduler` implements `RenderPort`, splitting each
//!   request into bands for its worker pool
//! - **Output**: completed passes come back as `RenderEvent`s, and the
//!   `CompletionNotifier` port lets a window loop know when to collect them

pub mod controller;
pub mod data;
pub mod debounce;
pub mod errors;
pub mod events;
pub mod ports;
pub mod render_pass;
pub mod settings;
pub mod state;
pub mod tile_scheduler;

pub use controller::InteractionController;
pub use data::frame_data::FrameData;
pub use data::render_request::RenderRequest;
pub use errors::render_error::RenderError;
pub use events::render_event::RenderEvent;
pub use ports::completion_notifier::{CompletionNotifier, NoopNotifier};
pub use ports::render_port::RenderPort;
pub use settings::InteractionSettings;
pub use state::WheelDirection;
pub use tile_scheduler::{SchedulerConfig, SchedulerError, TileScheduler};
