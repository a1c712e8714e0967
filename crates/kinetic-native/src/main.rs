use clap::Parser;
use kinetic_core::controls::{action_for_key, nudged, KeyAction};
use kinetic_core::{ExpansionHandle, LoopControl, OrbitCamera, ParticleEngine, ShapeKind};
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

mod audio;
mod cli;
mod gpu;
mod input;

use gpu::GpuState;

const EXPANSION_KEY_STEP: f32 = 0.1;
const MAX_FRAME_DT_SEC: f32 = 0.1;
const HELP: &str = "1-9 shape | arrows expansion | M microphone | drag orbit | wheel zoom | \
                    space auto-rotate | C reset view | R reshuffle | Esc quit";

struct Viewer {
    engine: ParticleEngine,
    camera: OrbitCamera,
    expansion: ExpansionHandle,
    mic: Option<audio::MicInput>,
    control: LoopControl,
    drag: input::Drag,
    started: Instant,
    last_frame: Instant,
    title: Option<(ShapeKind, u32, bool)>,
}

impl Viewer {
    fn new(engine: ParticleEngine, aspect: f32) -> Self {
        let now = Instant::now();
        Self {
            expansion: engine.expansion_handle(),
            engine,
            camera: OrbitCamera::new(aspect),
            mic: None,
            control: LoopControl::new(),
            drag: input::Drag::default(),
            started: now,
            last_frame: now,
            title: None,
        }
    }

    fn toggle_audio(&mut self) {
        match self.mic.take() {
            Some(mic) => {
                drop(mic);
                self.engine.detach_audio();
                log::info!("[audio] microphone off");
            }
            None => match audio::start_microphone() {
                Ok(mic) => {
                    self.engine.attach_audio(mic.level());
                    self.mic = Some(mic);
                }
                Err(e) => log::warn!("[audio] microphone unavailable: {e:#}"),
            },
        }
    }

    fn handle_key(&mut self, key: &Key) {
        if let Key::Named(NamedKey::Escape) = key {
            self.control.stop();
            return;
        }
        let Some(action) = input::dom_key_name(key).and_then(|k| action_for_key(k, EXPANSION_KEY_STEP))
        else {
            return;
        };
        match action {
            KeyAction::SelectShape(kind) => {
                if self.engine.set_shape(kind) {
                    log::info!("[keys] shape {}", kind.label());
                }
            }
            KeyAction::NudgeExpansion(delta) => {
                let next = nudged(self.expansion.target(), delta);
                self.expansion.set_target(next);
            }
            KeyAction::ToggleAudio => self.toggle_audio(),
            KeyAction::ToggleOverlay => log::info!("{HELP}"),
            KeyAction::ToggleAutoRotate => {
                self.camera.auto_rotate = !self.camera.auto_rotate;
                log::info!("[keys] auto-rotate={}", self.camera.auto_rotate);
            }
            KeyAction::Regenerate => {
                self.engine.regenerate();
                log::info!("[keys] regenerated cloud");
            }
            KeyAction::ResetCamera => self.camera.reset(),
        }
    }

    fn frame(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt_sec = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_frame = now;
        let time = (now - self.started).as_secs_f32();

        self.camera.set_aspect(gpu.aspect());
        self.camera.update(dt_sec);
        let report = gpu.render(&mut self.engine, &self.camera, time)?;

        let shown = (
            self.engine.shape(),
            (report.expansion.clamp(0.0, 1.0) * 100.0).round() as u32,
            self.engine.has_audio(),
        );
        if self.title != Some(shown) {
            let (shape, tension, mic) = shown;
            let mic = if mic { " | mic" } else { "" };
            gpu.window
                .set_title(&format!("Kinetic | {} | Tension {}%{}", shape.label(), tension, mic));
            self.title = Some(shown);
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = cli::Args::parse();
    let params = args.engine_params()?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Kinetic")
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window, params.particle_count))?;
    let mut viewer = Viewer::new(ParticleEngine::new(&params), gpu.aspect());
    if !args.no_audio {
        viewer.toggle_audio();
    }
    log::info!("{HELP}");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::CloseRequested => viewer.control.stop(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => viewer.handle_key(&logical_key),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => viewer.drag.set_pressed(state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((dx, dy)) = viewer.drag.cursor_moved(position.x, position.y) {
                    viewer.camera.orbit(dx, dy);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                viewer.camera.zoom(input::wheel_delta_px(delta))
            }
            _ => {}
        },
        Event::AboutToWait => {
            if !viewer.control.is_running() {
                elwt.exit();
                return;
            }
            match viewer.frame(&mut gpu) {
                Ok(()) => gpu.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu.resize(gpu.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    viewer.control.stop();
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
