use std::env;
use std::sync::Arc;
use std::time::Duration;

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowBuilder;

use crate::{AppPaths, StartupError};

use super::{
    run_fixed_timestep, InputState, Key, LoopControl, LoopDriver, LoopSummary, MouseButton,
    Renderer, Scene, SceneCommand, SceneError, SystemClock, TimestepConfig,
};

pub const TPS_ENV_VAR: &str = "TANK_TPS";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub yield_sleep: Duration,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Tank Game".to_string(),
            window_width: 1280,
            window_height: 720,
            target_tps: 60,
            yield_sleep: Duration::from_millis(2),
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("failed to load scene: {0}")]
    SceneLoad(#[source] SceneError),
}

/// Opens the window, loads `scene` and drives it with the fixed-timestep loop
/// until a quit is requested. The scene is unloaded before returning.
pub fn run_app(
    config: LoopConfig,
    paths: &AppPaths,
    mut scene: Box<dyn Scene>,
) -> Result<LoopSummary, AppError> {
    info!(
        root = %paths.root.display(),
        levels_dir = %paths.levels_dir.display(),
        asset_root = %paths.asset_root.display(),
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(
        window,
        config.window_width,
        config.window_height,
        paths.asset_root.clone(),
    )
    .map_err(AppError::CreateRenderer)?;

    scene.load(&mut renderer).map_err(AppError::SceneLoad)?;

    let target_tps = resolve_target_tps(config.target_tps);
    let timestep = TimestepConfig {
        target_tps: f64::from(target_tps),
        yield_sleep: config.yield_sleep,
        report_interval_ms: (config.metrics_log_interval.as_millis() as u64).max(1),
    };
    info!(
        target_tps,
        yield_sleep_ms = timestep.yield_sleep.as_millis() as u64,
        metrics_log_interval_ms = timestep.report_interval_ms,
        buffer_width = config.window_width,
        buffer_height = config.window_height,
        "loop_config"
    );

    let mut driver = WindowDriver {
        event_loop,
        renderer,
        scene,
        input: InputCollector::default(),
        window_title: config.window_title,
        last_applied_title: None,
        exit_requested: false,
    };
    let clock = SystemClock::new();
    let summary = run_fixed_timestep(&clock, &timestep, &mut driver);

    driver.scene.unload(&mut driver.renderer);
    info!(
        total_ticks = summary.total_ticks,
        total_frames = summary.total_frames,
        live_textures = driver.renderer.textures().live_count(),
        "shutdown"
    );
    Ok(summary)
}

struct WindowDriver {
    event_loop: EventLoop<()>,
    renderer: Renderer,
    scene: Box<dyn Scene>,
    input: InputCollector,
    window_title: String,
    last_applied_title: Option<String>,
    exit_requested: bool,
}

impl LoopDriver for WindowDriver {
    fn tick(&mut self) {
        if self.scene.update(&self.input.state) == SceneCommand::Quit {
            self.exit_requested = true;
        }
    }

    fn render(&mut self) {
        self.renderer.begin_frame();
        let command = self.scene.render(&self.input.state, &mut self.renderer);
        if let Err(error) = self.renderer.present() {
            warn!(error = %error, "renderer_draw_failed");
            self.exit_requested = true;
        }
        if command == SceneCommand::Quit {
            self.exit_requested = true;
        }

        let next_title = self.scene.debug_title();
        if next_title != self.last_applied_title {
            let title = next_title.as_deref().unwrap_or(&self.window_title);
            self.renderer.window().set_title(title);
            self.last_applied_title = next_title;
        }
    }

    fn poll_input(&mut self) -> LoopControl {
        let window_id = self.renderer.window().id();
        let renderer = &mut self.renderer;
        let input = &mut self.input;
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, target| {
                let Event::WindowEvent {
                    window_id: event_window,
                    event,
                } = event
                else {
                    return;
                };
                if event_window != window_id {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => {
                        input.quit_requested = true;
                        info!(reason = "window_close", "shutdown_requested");
                        target.exit();
                    }
                    WindowEvent::Resized(size) => {
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            input.quit_requested = true;
                            target.exit();
                        }
                    }
                    WindowEvent::Focused(focused) => {
                        input.state.set_focused(focused);
                        info!(focused, "focus_changed");
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let cursor = renderer.window_to_buffer(position.x, position.y);
                        input.state.set_cursor(cursor);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        input.handle_mouse_input(button, state);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        let pressed = event.state == ElementState::Pressed;
                        if input.handle_physical_key(event.physical_key, pressed) {
                            info!(reason = "escape_key", "shutdown_requested");
                            target.exit();
                        }
                    }
                    _ => {}
                }
            });

        if matches!(status, PumpStatus::Exit(_))
            || self.input.quit_requested
            || self.exit_requested
        {
            LoopControl::Exit
        } else {
            LoopControl::Continue
        }
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    state: InputState,
    quit_requested: bool,
}

impl InputCollector {
    /// Returns true when this event is the one that requested quit.
    fn handle_physical_key(&mut self, key: PhysicalKey, pressed: bool) -> bool {
        let PhysicalKey::Code(code) = key else {
            return false;
        };
        let Some(key) = map_key_code(code) else {
            return false;
        };
        self.state.set_key(key, pressed);
        if key == Key::Escape && pressed && !self.quit_requested {
            self.quit_requested = true;
            return true;
        }
        false
    }

    fn handle_mouse_input(&mut self, button: WinitMouseButton, state: ElementState) {
        if let Some(button) = map_mouse_button(button) {
            self.state
                .set_mouse_button(button, state == ElementState::Pressed);
        }
    }
}

fn map_key_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyW => Key::W,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowUp => Key::Up,
        _ => return None,
    };
    Some(key)
}

fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

fn resolve_target_tps(config_tps: u32) -> u32 {
    let fallback = config_tps.max(1);
    match env::var(TPS_ENV_VAR) {
        Ok(value) => tps_from_env_value(&value).unwrap_or_else(|| {
            warn!(
                env_var = TPS_ENV_VAR,
                value = value.as_str(),
                "invalid tps env var value; falling back to config"
            );
            fallback
        }),
        Err(env::VarError::NotPresent) => fallback,
        Err(err) => {
            warn!(
                env_var = TPS_ENV_VAR,
                error = %err,
                "unable to read tps env var; falling back to config"
            );
            fallback
        }
    }
}

fn tps_from_env_value(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|tps| *tps > 0)
}
