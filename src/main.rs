//! discrig - orbit camera around a spinning disc
//!
//! Drag the disc to spin it, drag the background to orbit, arrows/WASD to
//! pan, scroll to zoom. R resets the camera, F toggles fullscreen, Escape
//! exits.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use discrig::config::AppConfig;
use discrig::input::{InputAction, InputMapper};
use discrig::picking::{self, Projection};
use discrig::systems::{FrameScheduler, WindowSystem};
use discrig::target::SceneSink;
use discrig_input::{InputEvent, InputHub, PointerEvent, PointerTarget};
use discrig_math::Vec2;
use discrig_physics::PhysicsError;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    hub: InputHub,
    frames: FrameScheduler,
    sink: SceneSink,
    projection: Projection,
    /// Last cursor position in physical pixels
    cursor: Vec2,
    /// Target of the press in progress, if the left button is down
    pressed: Option<PointerTarget>,
    started: Instant,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, PhysicsError> {
        let sink = SceneSink::from_config(&config)?;

        let hub = InputHub::new();
        let mut frames = FrameScheduler::new(
            config.camera_controller(),
            config.spin_controller(),
            config.disc.position(),
        );
        frames.attach(&hub);

        let projection = Projection {
            fov_degrees: config.camera.fov,
            near: config.camera.near,
            far: config.camera.far,
        };

        Ok(Self {
            config,
            window: None,
            hub,
            frames,
            sink,
            projection,
            cursor: Vec2::ZERO,
            pressed: None,
            started: Instant::now(),
        })
    }

    /// Decide whether the cursor is over the disc
    fn pick(&self, viewport: Vec2) -> PointerTarget {
        let camera = self.frames.camera().pose();
        picking::pick_target(
            &camera,
            &self.projection,
            viewport,
            self.cursor,
            &self.frames.disc_pose(),
            &self.config.disc.geometry,
        )
    }

    fn pointer_event(&self, target: PointerTarget) -> PointerEvent {
        PointerEvent::new(self.cursor.x, self.cursor.y, target)
    }

    fn release_pointer(&mut self) {
        if let Some(target) = self.pressed.take() {
            self.hub.dispatch(&InputEvent::PointerUp(self.pointer_event(target)));
        }
    }

    fn apply_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => self.frames.reset_camera(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };
                if !event.repeat {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.apply_action(action, event_loop);
                        return;
                    }
                }
                let input = match event.state {
                    ElementState::Pressed => InputEvent::KeyDown(key),
                    ElementState::Released => InputEvent::KeyUp(key),
                };
                self.hub.dispatch(&input);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let target = self.pressed.unwrap_or_default();
                self.hub.dispatch(&InputEvent::PointerMove(self.pointer_event(target)));
            }
            WindowEvent::CursorLeft { .. } => {
                self.release_pointer();
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    let Some(viewport) = self.window.as_ref().map(WindowSystem::viewport) else {
                        return;
                    };
                    let target = self.pick(viewport);
                    log::debug!("Pointer down on {:?} at {:?}", target, self.cursor);
                    self.pressed = Some(target);
                    self.hub.dispatch(&InputEvent::PointerDown(self.pointer_event(target)));
                }
                ElementState::Released => self.release_pointer(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.hub.dispatch(&InputEvent::Scroll(lines));
            }
            WindowEvent::RedrawRequested => {
                let time = self.started.elapsed().as_secs_f64();
                let output = self.frames.step(time, &mut self.sink);

                if let Some(window) = &self.window {
                    if self.config.debug.title_telemetry {
                        window.update_title(
                            output.camera.position,
                            output.angular_velocity,
                            self.frames.disc().is_dragging(),
                        );
                    }
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.frames.teardown();
        log::info!(
            "Exiting after {} frames ({} disc poses rejected)",
            self.frames.frame_count(),
            self.sink.rejected_poses()
        );
    }
}

fn main() {
    // Load configuration before logging so the configured level applies
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting discrig");

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build physics scene: {}", e);
            return;
        }
    };

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    event_loop.run_app(&mut app).expect("Event loop error");
}
