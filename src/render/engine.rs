use std::sync::Arc;
use winit::window::Window;

use crate::ui::integration::{EguiLayer, PaintTarget};
use crate::ui::style::apply_hanoi_style;

/// Background behind the board.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub window: Arc<Window>,
}

impl GpuState {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("torre-hanoi device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        // egui expects a linear framebuffer.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            window,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// GPU surface plus the egui layer that draws the whole scene.
pub struct RenderEngine {
    pub gpu: GpuState,
    pub egui: EguiLayer,
}

impl RenderEngine {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let gpu = GpuState::new(window.clone())?;
        let egui = EguiLayer::new(&gpu.device, gpu.config.format, &window);
        apply_hanoi_style(&egui.ctx);
        Ok(Self { gpu, egui })
    }

    /// Builds the UI with `build`, paints it over the clear color and
    /// presents. On a surface error nothing is presented, but texture
    /// uploads still happen.
    pub fn run_frame(&mut self, build: impl FnMut(&egui::Context)) -> Result<(), wgpu::SurfaceError> {
        let window = self.gpu.window.clone();
        let ui = self.egui.run(&window, build);
        self.egui.upload_textures(&self.gpu.device, &self.gpu.queue, &ui);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                self.egui.release(ui);
                return Err(e);
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gpu.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            },
        );
        self.egui.paint(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &PaintTarget {
                view: &view,
                size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
                clear: CLEAR_COLOR,
            },
            &ui,
        );
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.egui.release(ui);

        window.pre_present_notify();
        output.present();
        Ok(())
    }
}
