//! Window state and event handling for the explorer.

use std::time::Instant;

use egui::Context;
use egui_winit::State as EguiWinitState;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::controllers::interactive::controller::InteractionController;
use crate::controllers::interactive::state::WheelDirection;
use crate::controllers::interactive::tile_scheduler::TileScheduler;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::render_config::MAX_ITERATIONS_LIMIT;
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::presenter::PixelsPresenter;

pub struct GuiApp {
    presenter: PixelsPresenter,
    controller: InteractionController<TileScheduler>,
    /// Slider value; pushed into the controller when it changes.
    max_iterations: u32,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl GuiApp {
    pub fn new(
        window: &Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: PixelsPresenter,
        controller: InteractionController<TileScheduler>,
    ) -> Self {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None, // max_texture_side, use default
        );

        Self {
            presenter,
            max_iterations: controller.render_config().max_iterations(),
            controller,
            egui_ctx,
            egui_state,
        }
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController<TileScheduler> {
        &mut self.controller
    }

    /// Forwards a window event to egui, then to the controller unless egui
    /// used it. Returns whether a redraw is needed.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);
        if response.consumed {
            return response.repaint;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.controller.pointer_moved(to_point(position.x, position.y));
                response.repaint
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let pointer = self.controller.state().pointer;
                match state {
                    ElementState::Pressed => self.controller.pointer_pressed(pointer),
                    ElementState::Released => {
                        self.controller.pointer_released(pointer);
                    }
                }
                response.repaint
            }
            WindowEvent::CursorLeft { .. } => {
                self.controller.pointer_left();
                response.repaint
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up (away from the user) as positive
                let vertical = match delta {
                    MouseScrollDelta::LineDelta(_, y) => f64::from(*y),
                    MouseScrollDelta::PixelDelta(position) => position.y,
                };

                if let Some(direction) = WheelDirection::from_delta(-vertical) {
                    self.controller.wheel(direction, Instant::now());
                }
                response.repaint
            }
            _ => response.repaint,
        }
    }

    /// Resizes the surface and re-renders at the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.presenter.resize(width, height)?;
        self.controller.resize(width, height);

        Ok(())
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.egui_ctx.set_pixels_per_point(scale_factor as f32);
    }

    /// Fires any due debounced render and hands finished passes to the
    /// presenter. Returns whether the display changed.
    pub fn update(&mut self, now: Instant) -> bool {
        self.controller.tick(now);

        let mut changed = false;
        for event in self.controller.render_port_mut().poll() {
            changed |= self.presenter.present(event);
        }

        changed
    }

    /// The next instant the loop must wake even without input.
    pub fn next_deadline(&self) -> Option<Instant> {
        let debounce = self.controller.next_deadline();
        let stall = self.controller.render_port().next_deadline();

        match (debounce, stall) {
            (Some(debounce), Some(stall)) => Some(debounce.min(stall)),
            (debounce, stall) => debounce.or(stall),
        }
    }

    /// Runs the egui frame, draws it over the fractal and presents. Returns
    /// whether egui asked for another frame straight away.
    pub fn redraw(&mut self, window: &Window) -> Result<bool, pixels::Error> {
        let mut egui_output = self.update_ui(window);

        let platform_output = std::mem::take(&mut egui_output.platform_output);
        self.egui_state
            .handle_platform_output(window, platform_output);

        let repaint = egui_output
            .viewport_output
            .values()
            .any(|viewport| viewport.repaint_delay.is_zero());

        self.presenter.render(egui_output, &self.egui_ctx)?;

        Ok(repaint)
    }

    fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let viewport = self.controller.viewport();
        let frame_size = self.controller.frame_size();
        let last_render_duration = self.presenter.last_render_duration();
        let last_error_message = self.presenter.last_error_message().map(str::to_owned);
        let mut max_iterations = self.max_iterations;

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Mandelbrot")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 180.0])
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Max iterations:");
                        ui.add(egui::Slider::new(
                            &mut max_iterations,
                            0..=MAX_ITERATIONS_LIMIT,
                        ));
                    });

                    ui.separator();
                    ui.label(format!(
                        "Real: [{:.6}, {:.6}]",
                        viewport.x_from(),
                        viewport.x_to()
                    ));
                    ui.label(format!(
                        "Imag: [{:.6}, {:.6}]",
                        viewport.y_from(),
                        viewport.y_to()
                    ));
                    ui.label(format!(
                        "Frame: {}x{}",
                        frame_size.width(),
                        frame_size.height()
                    ));

                    if let Some(render_duration) = last_render_duration {
                        ui.label(format!("Last render: {} ms", render_duration.as_millis()));
                    }
                    if let Some(message) = &last_error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        });

        if max_iterations != self.max_iterations {
            match self.controller.set_max_iterations(max_iterations) {
                Ok(()) => {
                    tracing::debug!(max_iterations, "max iterations changed");
                    self.max_iterations = max_iterations;
                }
                Err(error) => tracing::warn!(%error, "max iterations rejected"),
            }
        }

        output
    }
}

fn to_point(x: f64, y: f64) -> Point {
    Point {
        x: x.round() as i32,
        y: y.round() as i32,
    }
}
