//! winit glue: window creation, event routing, and the redraw chain.
//!
//! The redraw-request loop is the frame scheduler: every `RedrawRequested`
//! ticks the system once, renders the recorded frame, and immediately asks
//! for the next redraw. Pointer and resize events land between ticks on the
//! same thread, so the system never needs locking.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::background::{Spawner, StopHandle};
use crate::error::Error;
use crate::frame::Frame;
use crate::gpu::GpuState;
use crate::input::Input;
use crate::system::{ParticleSystem, SystemConfig};

pub(crate) struct App {
    config: Option<SystemConfig>,
    spawner: Option<Spawner>,
    title: String,
    window_size: (u32, u32),
    stop: StopHandle,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    system: Option<ParticleSystem>,
    frame: Frame,
    input: Input,
    init_error: Option<Error>,
}

impl App {
    pub fn new(
        config: SystemConfig,
        spawner: Option<Spawner>,
        title: String,
        window_size: (u32, u32),
        stop: StopHandle,
    ) -> Self {
        Self {
            config: Some(config),
            spawner,
            title,
            window_size,
            stop,
            window: None,
            gpu: None,
            system: None,
            frame: Frame::new(),
            input: Input::new(),
            init_error: None,
        }
    }

    /// The initialization error that aborted the loop, if any.
    pub fn into_error(self) -> Option<Error> {
        self.init_error
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        self.init_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };

        let config = self.config.take().unwrap_or_default();
        let line_capacity = config.particle_count.saturating_mul(8);
        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            config.background_color,
            config.particle_count,
            line_capacity,
        ));
        let gpu = match gpu {
            Ok(gpu) => gpu,
            Err(err) => return self.fail(event_loop, err),
        };

        let size = window.inner_size();
        let surface = Vec2::new(size.width as f32, size.height as f32);
        let system = match self.spawner.take() {
            Some(mut spawner) => ParticleSystem::from_spawner(surface, config, move |ctx| {
                spawner(ctx)
            }),
            None => ParticleSystem::new(surface, config),
        };

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.system = Some(system);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(system) = &mut self.system {
                    system.resize(Vec2::new(
                        physical_size.width as f32,
                        physical_size.height as f32,
                    ));
                }
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::CursorLeft { .. } => {
                self.input.handle_event(&event);
                if let Some(system) = &mut self.system {
                    system.set_pointer(self.input.pointer());
                }
            }
            WindowEvent::RedrawRequested => {
                if self.stop.is_stopped() {
                    event_loop.exit();
                    return;
                }

                if let (Some(system), Some(gpu)) = (&mut self.system, &mut self.gpu) {
                    system.frame_tick(&mut self.frame);
                    match gpu.render(&self.frame) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                            width: gpu.config.width,
                            height: gpu.config.height,
                        }),
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
