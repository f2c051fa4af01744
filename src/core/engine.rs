//! Engine facade and main frame loop

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::core::commands::{CommandQueue, EngineCommand};
use crate::core::debug::FrameStats;
use crate::core::time::Time;
use crate::render::{NullRenderer, Renderer};
use crate::scene::SceneManager;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: String::from("keel"),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

impl EngineConfig {
    /// Create a new config with a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set window dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable VSync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

/// Top-level engine facade.
///
/// Owns the one [`SceneManager`], the frame clock, and the renderer
/// collaborator, and drives one `update` per frame on the current scene.
/// Window events are routed to the current scene's input manager; commands
/// pushed from input callbacks are drained at the end of each frame.
pub struct Engine {
    config: EngineConfig,
    manager: SceneManager,
    time: Time,
    stats: FrameStats,
    commands: CommandQueue,
    renderer: Box<dyn Renderer>,
    window: Option<Arc<Window>>,
    cursor: Vec2,
    should_quit: bool,
}

impl Engine {
    /// Create an engine with a headless renderer; see [`Engine::with_renderer`]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            manager: SceneManager::new(),
            time: Time::new(),
            stats: FrameStats::new(),
            commands: CommandQueue::new(),
            renderer: Box::new(NullRenderer::new()),
            window: None,
            cursor: Vec2::ZERO,
            should_quit: false,
        }
    }

    /// Install a renderer collaborator in place of the headless default
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// The scene manager
    pub fn scenes(&self) -> &SceneManager {
        &self.manager
    }

    /// The scene manager, mutably
    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.manager
    }

    /// A handle to the command queue, for capture by input callbacks
    pub fn commands(&self) -> CommandQueue {
        self.commands.clone()
    }

    /// Frame statistics for the session so far
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame without a window: update the current scene, present it,
    /// and apply queued commands. This is the whole per-frame path minus the
    /// host event pump, usable by tests and windowless hosts.
    pub fn advance_frame(&mut self, delta_time: f32) {
        self.manager.draw(delta_time, self.renderer.as_mut());
        self.drain_commands();
    }

    fn drain_commands(&mut self) {
        for command in self.commands.drain() {
            match command {
                EngineCommand::ChangeScene(id) => {
                    self.manager.change_scene(&id);
                }
                EngineCommand::Quit => {
                    self.should_quit = true;
                }
            }
        }
    }

    /// Run the engine until the window closes or a quit command arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the event loop cannot be created or fails while
    /// running.
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        log::info!("starting engine: {}", self.config.title);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        Ok(())
    }
}

impl ApplicationHandler for Engine {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                self.renderer.resize(self.config.width, self.config.height);
                self.manager.handle_resize(self.config.width, self.config.height);
                self.window = Some(Arc::new(window));
            }
            Err(error) => {
                log::error!("failed to create window: {error}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    self.renderer.resize(new_size.width, new_size.height);
                    self.manager.handle_resize(new_size.width, new_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(code) = event.physical_key
                    && event.state.is_pressed()
                    && let Some(scene) = self.manager.current_mut()
                {
                    scene.input_mut().handle_key_down(code);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                if let Some(scene) = self.manager.current_mut() {
                    scene.input_mut().handle_mouse_moved(self.cursor);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let cursor = self.cursor;
                if let Some(scene) = self.manager.current_mut() {
                    let input = scene.input_mut();
                    input.handle_mouse_button(button, state.is_pressed());
                    if button == winit::event::MouseButton::Left && state.is_pressed() {
                        input.handle_mouse_click(cursor.x, cursor.y);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32)
                    }
                };
                if let Some(scene) = self.manager.current_mut() {
                    scene.input_mut().handle_scroll(scroll);
                }
            }

            WindowEvent::RedrawRequested => {
                self.time.update();
                self.stats.record_frame(self.time.delta());

                self.advance_frame(self.time.delta_seconds());

                if self.should_quit {
                    log::info!("quit command received, shutting down");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
