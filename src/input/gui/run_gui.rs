use std::sync::Arc;
use std::time::Instant;

use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::{Window, WindowBuilder};

use crate::controllers::interactive::controller::InteractionController;
use crate::controllers::interactive::ports::completion_notifier::CompletionNotifier;
use crate::controllers::interactive::tile_scheduler::{
    SchedulerConfig, SchedulerError, TileScheduler,
};
use crate::core::data::frame_size::FrameSize;
use crate::input::gui::app::GuiApp;
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::presenter::PixelsPresenter;
use crate::presenters::pixels::waker::EventLoopWaker;

#[derive(thiserror::Error, Debug)]
pub enum GuiError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("pixel surface failed: {0}")]
    Surface(#[from] pixels::Error),
    #[error("failed to resize pixel surface: {0}")]
    Resize(#[from] pixels::TextureError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Opens the explorer window and runs until it is closed.
pub fn run_gui(scheduler_config: SchedulerConfig) -> Result<(), GuiError> {
    let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
    let waker = Arc::new(EventLoopWaker::new(event_loop.create_proxy()));

    // Leak the window to get a 'static reference for pixels
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title("Mandelbrot Explorer")
            .with_inner_size(LogicalSize::new(800.0, 600.0))
            .with_min_inner_size(LogicalSize::new(200.0, 200.0))
            .build(&event_loop)?,
    ));

    let presenter = PixelsPresenter::new(window)?;
    let scheduler = TileScheduler::with_notifier(
        scheduler_config,
        waker as Arc<dyn CompletionNotifier>,
    )?;
    let size = window.inner_size();
    let controller =
        InteractionController::new(FrameSize::clamped(size.width, size.height), scheduler);
    let mut app = GuiApp::new(window, &event_loop, presenter, controller);

    app.controller_mut().render_now();

    let mut redraw_pending = true;
    let mut failure: Option<GuiError> = None;

    event_loop.run(|event, elwt| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::RedrawRequested => {
                redraw_pending = false;

                match app.redraw(window) {
                    Ok(repaint) => redraw_pending |= repaint,
                    Err(error) => {
                        tracing::error!(%error, "render failed");
                        failure = Some(error.into());
                        elwt.exit();
                    }
                }
            }
            WindowEvent::Resized(size) => {
                if let Err(error) = app.resize(size.width, size.height) {
                    tracing::error!(%error, "resize failed");
                    failure = Some(error.into());
                    elwt.exit();
                }
                redraw_pending = true;
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                app.set_scale_factor(*scale_factor);
                redraw_pending = true;
            }
            _ => {
                redraw_pending |= app.handle_window_event(window, event);
            }
        },
        Event::UserEvent(GuiEvent::Wake) => {
            redraw_pending |= app.update(Instant::now());
        }
        Event::AboutToWait => {
            redraw_pending |= app.update(Instant::now());

            if redraw_pending {
                window.request_redraw();
            }

            match app.next_deadline() {
                Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                None => elwt.set_control_flow(ControlFlow::Wait),
            }
        }
        _ => {}
    })?;

    match failure {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
