//! egui driven from winit events and painted with wgpu. The whole scene is
//! egui, so a frame is: run the UI, upload what changed, paint one pass.

use winit::window::Window;

/// Where a frame is painted and what it is cleared to.
pub struct PaintTarget<'a> {
    pub view: &'a wgpu::TextureView,
    pub size_in_pixels: [u32; 2],
    pub clear: wgpu::Color,
}

/// One UI pass, tessellated and waiting to be painted.
pub struct PaintedUi {
    jobs: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
}

pub struct EguiLayer {
    pub ctx: egui::Context,
    input: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiLayer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let input = egui_winit::State::new(ctx.clone(), ctx.viewport_id(), window, None, None, None);
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());
        Self { ctx, input, renderer }
    }

    /// Returns true if egui consumed the event.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.input.on_window_event(window, event).consumed
    }

    pub fn wants_keyboard_input(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Runs `build` against this frame's input and tessellates the result.
    pub fn run(&mut self, window: &Window, build: impl FnMut(&egui::Context)) -> PaintedUi {
        let raw_input = self.input.take_egui_input(window);
        let output = self.ctx.run(raw_input, build);
        self.input.handle_platform_output(window, output.platform_output);
        PaintedUi {
            jobs: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Must happen even when the frame is not presented: egui sends the
    /// font atlas only once.
    pub fn upload_textures(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, ui: &PaintedUi) {
        for (id, delta) in &ui.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
    }

    /// Records a single pass that clears `target` and paints `ui` onto it.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &PaintTarget<'_>,
        ui: &PaintedUi,
    ) {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: target.size_in_pixels,
            pixels_per_point: ui.pixels_per_point,
        };
        self.renderer.update_buffers(device, queue, encoder, &ui.jobs, &screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("board pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(target.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &ui.jobs, &screen);
    }

    /// Frees textures egui no longer needs. Call after the paint is submitted.
    pub fn release(&mut self, ui: PaintedUi) {
        for id in &ui.textures.free {
            self.renderer.free_texture(id);
        }
    }
}
