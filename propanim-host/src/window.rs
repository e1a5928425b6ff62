//! # Window 模块
//!
//! winit 事件循环 + wgpu 表面 + egui 集成。
//! 每次重绘调用 [`AppState::ui`]，再把 egui 的输出提交给 GPU。

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, anyhow};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::app::AppState;
use crate::config::WindowConfig;

/// 打开窗口并运行，直到窗口关闭
pub fn run(app: AppState) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("创建事件循环失败")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut shell = Shell {
        app,
        gpu: None,
        failure: None,
    };
    event_loop.run_app(&mut shell)?;

    match shell.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct Shell {
    app: AppState,
    gpu: Option<Gpu>,
    failure: Option<anyhow::Error>,
}

impl ApplicationHandler for Shell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.app.config.window) {
            Ok(gpu) => {
                info!(
                    width = gpu.surface_config.width,
                    height = gpu.surface_config.height,
                    format = ?gpu.surface_config.format,
                    "窗口已创建"
                );
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!(error = %e, "初始化图形后端失败");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let response = gpu.egui_state.on_window_event(&gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                info!("窗口关闭");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(e) = gpu.redraw(&mut self.app) {
                    warn!(error = %e, "绘制失败");
                }
            }
            _ => {}
        }

        if response.repaint {
            gpu.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let (redraw, control_flow) = schedule(gpu.repaint_at, Instant::now());
        if redraw {
            gpu.repaint_at = None;
            gpu.window.request_redraw();
        }
        event_loop.set_control_flow(control_flow);
    }
}

/// 按 egui 要求的重绘时刻决定是否立即重绘，以及事件循环的等待方式
fn schedule(repaint_at: Option<Instant>, now: Instant) -> (bool, ControlFlow) {
    match repaint_at {
        Some(at) if at <= now => (true, ControlFlow::Wait),
        Some(at) => (false, ControlFlow::WaitUntil(at)),
        None => (false, ControlFlow::Wait),
    }
}

/// 选择表面格式
///
/// egui-wgpu 输出的颜色已经是 sRGB 编码，需要非 sRGB 的目标格式，否则颜色会发白。
/// 适配器只支持 sRGB 格式时退回第一个。
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

/// 窗口与 GPU 资源
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    /// egui 要求的下一次重绘时刻
    repaint_at: Option<Instant>,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, config: &WindowConfig) -> anyhow::Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or_else(|| anyhow!("找不到可用的图形适配器"))?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None))?;

        let size = window.inner_size();
        let mut surface_config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| anyhow!("窗口表面与适配器不兼容"))?;
        if let Some(format) = pick_surface_format(&surface.get_capabilities(&adapter).formats) {
            surface_config.format = format;
        }
        surface.configure(&device, &surface_config);

        let egui_state = egui_winit::State::new(
            egui::Context::default(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&device, surface_config.format, None, 1, false);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            surface_config,
            egui_state,
            egui_renderer,
            repaint_at: None,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn redraw(&mut self, app: &mut AppState) -> anyhow::Result<()> {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let ctx = self.egui_state.egui_ctx().clone();
        let output = ctx.run(raw_input, |ctx| app.ui(ctx));
        self.egui_state
            .handle_platform_output(&self.window, output.platform_output);

        let repaint_delay = output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map_or(Duration::MAX, |viewport| viewport.repaint_delay);
        self.repaint_at = Instant::now().checked_add(repaint_delay);

        let paint_jobs = ctx.tessellate(output.shapes, output.pixels_per_point);
        for (id, delta) in &output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                // 表面失效，重新配置后等下一帧
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: output.pixels_per_point,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
        let extra = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut pass = pass.forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }

        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        frame.present();

        for id in &output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn test_schedule_idle_waits() {
        let now = Instant::now();
        let (redraw, flow) = schedule(None, now);
        assert!(!redraw);
        assert_eq!(flow, ControlFlow::Wait);
    }

    #[test]
    fn test_schedule_due_repaint() {
        let now = Instant::now();
        let (redraw, flow) = schedule(Some(now), now);
        assert!(redraw);
        assert_eq!(flow, ControlFlow::Wait);
    }

    #[test]
    fn test_schedule_future_repaint() {
        let now = Instant::now();
        let later = now + Duration::from_millis(500);
        let (redraw, flow) = schedule(Some(later), now);
        assert!(!redraw);
        assert_eq!(flow, ControlFlow::WaitUntil(later));
    }

    #[test]
    fn test_pick_surface_format_prefers_linear() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn test_pick_surface_format_fallback() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(pick_surface_format(&[]), None);
    }
}
