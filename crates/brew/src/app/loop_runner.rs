use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::{resolve_app_paths, StartupError};

use super::layout::{DEVICE_HEIGHT, DEVICE_WIDTH};
use super::{Applet, Device, LogicalKey, Renderer};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_scale: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Hamlet Brew".to_string(),
            window_scale: 2,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
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
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, mut applet: Box<dyn Applet>) -> Result<(), AppError> {
    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        sprite_dir = %app_paths.sprite_dir.display(),
        "startup"
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window_scale = config.window_scale.max(1);
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                (DEVICE_WIDTH as u32 * window_scale) as f64,
                (DEVICE_HEIGHT as u32 * window_scale) as f64,
            ))
            .with_min_inner_size(LogicalSize::new(DEVICE_WIDTH as f64, DEVICE_HEIGHT as f64))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let window_for_loop = Arc::clone(&window);
    let mut renderer =
        Renderer::new(window, app_paths.sprite_dir.clone()).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let fixed_dt = Duration::from_secs_f64(1.0 / target_tps as f64);
    info!(
        target_tps,
        window_scale,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        "loop_config"
    );

    let mut device = Device::new();
    device.start(applet.as_mut());

    let mut input_collector = InputCollector::new();
    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window_for_loop.id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        info!(reason = "window_close", "shutdown_requested");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = window_for_loop.inner_size();
                        if let Err(error) = renderer.resize(size.width, size.height) {
                            warn!(error = %error, "renderer_resize_failed");
                            window_target.exit();
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input_collector.set_cursor_position(position);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        input_collector.handle_mouse_input(button, state);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        input_collector.handle_key(event.physical_key, event.state);
                        if input_collector.quit_requested {
                            info!(reason = "escape_key", "shutdown_requested");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                        last_frame_instant = now;

                        let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
                        accumulator = accumulator.saturating_add(clamped_frame_dt);

                        let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                        for _ in 0..step_plan.ticks_to_run {
                            for input in input_collector.drain_for_tick() {
                                apply_input(input, &mut device, &renderer, applet.as_mut());
                            }
                            device.update(fixed_dt, applet.as_mut());
                        }
                        accumulator = step_plan.remaining_accumulator;

                        if step_plan.dropped_backlog > Duration::ZERO {
                            warn!(
                                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                                max_ticks_per_frame, "sim_clamp_triggered"
                            );
                        }

                        if let Err(error) = renderer.render_device(&device) {
                            warn!(error = %error, "renderer_draw_failed");
                            window_target.exit();
                        }
                        let next_title = applet.debug_title();
                        if next_title != last_applied_title {
                            match &next_title {
                                Some(title) => window_for_loop.set_title(title),
                                None => window_for_loop.set_title(&config.window_title),
                            }
                            last_applied_title = next_title;
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                window_for_loop.request_redraw();
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

fn apply_input(
    input: QueuedInput,
    device: &mut Device,
    renderer: &Renderer,
    applet: &mut dyn Applet,
) {
    match input {
        QueuedInput::PressStart(position) => {
            device.press_start(renderer.window_to_device(position));
        }
        QueuedInput::PressEnd(position) => {
            device.press_end(renderer.window_to_device(position), applet);
        }
        QueuedInput::Key(key) => device.inject_key(key, applet),
        QueuedInput::NextCue => device.request_cue(applet),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum QueuedInput {
    PressStart(PhysicalPosition<f64>),
    PressEnd(PhysicalPosition<f64>),
    Key(LogicalKey),
    NextCue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    Key(LogicalKey),
    NextCue,
    Quit,
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    held_keys: HashSet<KeyCode>,
    cursor_position: Option<PhysicalPosition<f64>>,
    left_mouse_is_down: bool,
    pending: Vec<QueuedInput>,
}

impl InputCollector {
    fn new() -> Self {
        Self::default()
    }

    fn set_cursor_position(&mut self, position: PhysicalPosition<f64>) {
        self.cursor_position = Some(position);
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        let Some(position) = self.cursor_position else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if !self.left_mouse_is_down {
                    self.pending.push(QueuedInput::PressStart(position));
                }
                self.left_mouse_is_down = true;
            }
            ElementState::Released => {
                if self.left_mouse_is_down {
                    self.pending.push(QueuedInput::PressEnd(position));
                }
                self.left_mouse_is_down = false;
            }
        }
    }

    fn handle_key(&mut self, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(shortcut) = shortcut_for_key_code(code) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                if !self.held_keys.insert(code) {
                    return;
                }
                debug!(key_code = ?code, shortcut = ?shortcut, "input_shortcut_pressed");
                match shortcut {
                    Shortcut::Key(key) => self.pending.push(QueuedInput::Key(key)),
                    Shortcut::NextCue => self.pending.push(QueuedInput::NextCue),
                    Shortcut::Quit => self.quit_requested = true,
                }
            }
            ElementState::Released => {
                self.held_keys.remove(&code);
            }
        }
    }

    fn drain_for_tick(&mut self) -> Vec<QueuedInput> {
        std::mem::take(&mut self.pending)
    }
}

fn shortcut_for_key_code(code: KeyCode) -> Option<Shortcut> {
    let shortcut = match code {
        KeyCode::ArrowUp => Shortcut::Key(LogicalKey::ArrowUp),
        KeyCode::ArrowDown => Shortcut::Key(LogicalKey::ArrowDown),
        KeyCode::Enter | KeyCode::NumpadEnter => Shortcut::Key(LogicalKey::Ok),
        KeyCode::Digit1 | KeyCode::Numpad1 => Shortcut::Key(LogicalKey::Num1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Shortcut::Key(LogicalKey::Num2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Shortcut::Key(LogicalKey::Num3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Shortcut::Key(LogicalKey::Num4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Shortcut::Key(LogicalKey::Num5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Shortcut::Key(LogicalKey::Num6),
        KeyCode::Space => Shortcut::NextCue,
        KeyCode::Escape => Shortcut::Quit,
        _ => return None,
    };
    Some(shortcut)
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
