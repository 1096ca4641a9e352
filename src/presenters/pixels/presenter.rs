use std::time::Duration;

use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::wgpu;
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::core::actions::render_band::band::PassId;

/// Shows completed frames in the window's framebuffer with the egui panel
/// drawn on top.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    width: u32,
    height: u32,
    has_frame: bool,
    last_presented: Option<PassId>,
    last_render_duration: Option<Duration>,
    last_error_message: Option<String>,
}

impl PixelsPresenter {
    pub fn new(window: &'static Window) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        Ok(Self {
            pixels,
            egui_renderer,
            width: size.width,
            height: size.height,
            has_frame: false,
            last_presented: None,
            last_render_duration: None,
            last_error_message: None,
        })
    }

    #[must_use]
    pub fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }

    #[must_use]
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }

    /// Takes a render outcome. Frames are shown only if they match the
    /// current surface size and are newer than the frame on screen; returns
    /// whether the display changed.
    pub fn present(&mut self, event: RenderEvent) -> bool {
        match event {
            RenderEvent::Frame(frame) => {
                let frame_size = frame.pixel_buffer.frame_size();

                if frame_size.width() != self.width || frame_size.height() != self.height {
                    tracing::debug!(pass = %frame.pass_id, "dropping frame for old surface size");
                    return false;
                }

                if self.last_presented.is_some_and(|last| frame.pass_id <= last) {
                    tracing::debug!(pass = %frame.pass_id, "dropping superseded frame");
                    return false;
                }

                self.copy_frame(&frame);
                self.has_frame = true;
                self.last_presented = Some(frame.pass_id);
                self.last_render_duration = Some(frame.render_duration);
                self.last_error_message = None;

                true
            }
            RenderEvent::Error(error) => {
                tracing::warn!(%error, "render failed");
                self.last_error_message = Some(error.to_string());

                true
            }
        }
    }

    pub fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        if !self.has_frame {
            self.draw_placeholder();
        }

        let overlay = Overlay::new(egui_output, egui_ctx, [self.width, self.height]);
        let egui_renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);
            overlay.paint(egui_renderer, encoder, render_target, context);

            Ok(())
        })
    }

    /// Resizes the surface and framebuffer. The old frame no longer fits, so
    /// the placeholder shows until the next frame of the new size arrives.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;

        self.width = width;
        self.height = height;
        self.has_frame = false;

        Ok(())
    }

    fn draw_placeholder(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    fn copy_frame(&mut self, frame: &FrameData) {
        let src = frame.pixel_buffer.buffer();
        let dest = self.pixels.frame_mut();

        if dest.len() == src.len() {
            dest.copy_from_slice(src);
        }
    }
}

/// One frame of tessellated egui output, ready to be drawn over the fractal.
struct Overlay {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    screen: egui_wgpu::ScreenDescriptor,
}

impl Overlay {
    fn new(output: egui::FullOutput, ctx: &EguiContext, size_in_pixels: [u32; 2]) -> Self {
        let pixels_per_point = ctx.pixels_per_point();

        Self {
            primitives: ctx.tessellate(output.shapes, pixels_per_point),
            textures: output.textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels,
                pixels_per_point,
            },
        }
    }

    fn paint(
        &self,
        renderer: &mut EguiRenderer,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        context: &pixels::PixelsContext,
    ) {
        for (id, delta) in &self.textures.set {
            renderer.update_texture(&context.device, &context.queue, *id, delta);
        }
        renderer.update_buffers(
            &context.device,
            &context.queue,
            encoder,
            &self.primitives,
            &self.screen,
        );

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("mandelbrot-overlay"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            renderer.render(&mut pass, &self.primitives, &self.screen);
        }

        for id in &self.textures.free {
            renderer.free_texture(id);
        }
    }
}
