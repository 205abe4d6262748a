use anyhow::Result;
use clap::Parser;
use cubeview_render_wgpu::{CubeRenderer, OrbitCamera, RenderError, ViewerSettings};
use cubeview_texture::{PatternKind, TextureOptions};
use egui::Context as EguiContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "cubeview-desktop", about = "Interactive textured-cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Pattern texture edge length in pixels (bounded by common GPU
    /// texture limits)
    #[arg(long, default_value = "64", value_parser = clap::value_parser!(u32).range(1..=8192))]
    texture_size: u32,

    /// Pattern block edge length in pixels
    #[arg(long, default_value = "8")]
    block_size: u32,
}

/// Application state: everything the UI edits plus input bookkeeping.
struct AppState {
    settings: ViewerSettings,
    camera: OrbitCamera,
    texture_options: TextureOptions,
    /// Pattern currently uploaded to the GPU. Regeneration happens only
    /// when `settings.pattern` diverges from this.
    applied_pattern: PatternKind,
    show_panel: bool,
    orbiting: bool,
    panning: bool,
}

impl AppState {
    fn new(texture_options: TextureOptions) -> Self {
        Self {
            settings: ViewerSettings::default(),
            camera: OrbitCamera::default(),
            texture_options,
            applied_pattern: PatternKind::None,
            show_panel: true,
            orbiting: false,
            panning: false,
        }
    }

    /// Re-upload the pattern texture if the selected kind changed.
    fn sync_pattern(
        &mut self,
        renderer: &mut CubeRenderer,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) {
        if self.settings.pattern == self.applied_pattern {
            return;
        }
        let image = cubeview_texture::generate(self.settings.pattern, &self.texture_options);
        renderer.set_pattern(device, queue, image.as_ref());
        self.applied_pattern = self.settings.pattern;
        tracing::debug!("pattern texture updated: {:?}", self.applied_pattern);
    }

    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.orbiting = pressed,
            MouseButton::Right => self.panning = pressed,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }
        match key {
            KeyCode::KeyR => {
                self.camera.reset();
                tracing::info!("camera reset");
            }
            KeyCode::F1 => {
                self.show_panel = !self.show_panel;
            }
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::left("controls")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Cubeview");
                ui.separator();

                ui.heading("Material");
                ui.horizontal(|ui| {
                    ui.label("Color:");
                    ui.color_edit_button_rgb(&mut self.settings.color);
                });
                ui.add(
                    egui::Slider::new(&mut self.settings.roughness, 0.0..=1.0).text("Roughness"),
                );
                ui.add(
                    egui::Slider::new(&mut self.settings.metallic, 0.0..=1.0).text("Metalness"),
                );

                ui.separator();
                ui.heading("Pattern");
                for kind in PatternKind::ALL {
                    ui.radio_value(&mut self.settings.pattern, kind, kind.label());
                }

                ui.separator();
                ui.heading("Camera");
                let eye = self.camera.eye();
                ui.label(format!(
                    "Eye: ({:.1}, {:.1}, {:.1})  Dist: {:.1}",
                    eye.x, eye.y, eye.z, self.camera.distance
                ));
                if ui.button("Reset Camera (R)").clicked() {
                    self.camera.reset();
                }

                ui.separator();
                ui.small("LMB: Orbit | RMB: Pan | Scroll: Zoom | F1: Toggle Panel");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<CubeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(texture_options: TextureOptions) -> Self {
        Self {
            state: AppState::new(texture_options),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<(), RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        let renderer = CubeRenderer::new(&device, &queue, surface_format, size.width, size.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(surface), Some(device), Some(queue)) =
            (&self.surface, &self.device, &self.queue)
        else {
            return;
        };

        if let Some(renderer) = &mut self.renderer {
            self.state.sync_pattern(renderer, device, queue);
        }

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(config) = &self.config {
                    surface.configure(device, config);
                }
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(renderer) = &self.renderer {
            renderer.render(device, queue, &view, &self.state.camera, &self.state.settings);
        }

        let raw_input = self
            .egui_winit
            .as_mut()
            .unwrap()
            .take_egui_input(self.window.as_ref().unwrap());
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });

        self.egui_winit.as_mut().unwrap().handle_platform_output(
            self.window.as_ref().unwrap(),
            full_output.platform_output,
        );

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [
                self.config.as_ref().unwrap().width,
                self.config.as_ref().unwrap().height,
            ],
            pixels_per_point: full_output.pixels_per_point,
        };

        {
            let egui_renderer = self.egui_renderer.as_mut().unwrap();
            for (id, image_delta) in &full_output.textures_delta.set {
                egui_renderer.update_texture(device, queue, *id, image_delta);
            }
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
            egui_renderer.update_buffers(
                device,
                queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                egui_renderer.free_texture(id);
            }
        }

        output.present();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Cubeview")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_gpu(window) {
            tracing::error!("GPU initialization failed: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Releases must clear drag state even when egui consumes the
        // event: a drag that starts on the canvas can end over the panel,
        // and a stuck flag would leave the camera following the pointer.
        if let WindowEvent::MouseInput {
            button,
            state: ElementState::Released,
            ..
        } = event
        {
            self.state.handle_mouse_button(button, false);
        }

        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.camera.aspect =
                        config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.state
                    .handle_mouse_button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.state.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.orbiting {
                self.state.camera.orbit(delta.0 as f32, delta.1 as f32);
            } else if self.state.panning {
                self.state.camera.pan(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview-desktop starting");

    let texture_options = TextureOptions {
        size: cli.texture_size,
        block: cli.block_size.max(1),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(texture_options);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_release_always_clears_drag() {
        let mut state = AppState::new(TextureOptions::default());
        state.handle_mouse_button(MouseButton::Left, true);
        state.handle_mouse_button(MouseButton::Right, true);
        assert!(state.orbiting);
        assert!(state.panning);
        // A release is routed here even when the pointer ends over the
        // side panel; both drags must stop.
        state.handle_mouse_button(MouseButton::Left, false);
        state.handle_mouse_button(MouseButton::Right, false);
        assert!(!state.orbiting);
        assert!(!state.panning);
    }

    #[test]
    fn pattern_change_marks_resync_needed() {
        let mut state = AppState::new(TextureOptions::default());
        assert_eq!(state.applied_pattern, state.settings.pattern);
        state.settings.pattern = PatternKind::Checkered;
        assert_ne!(state.applied_pattern, state.settings.pattern);
    }
}
