use crate::app::App;
use crate::audio::MicState;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::input;
use crate::overlay;
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<App>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub started: Instant,
    pub last_instant: Instant,
    pub last_tension: Option<u32>,
    // positions when there is no GPU to upload to
    fallback: Vec<Vec3>,
}

impl FrameContext {
    pub fn new(app: Rc<App>, canvas: web::HtmlCanvasElement, gpu: Option<render::GpuState>) -> Self {
        let now = Instant::now();
        Self {
            app,
            canvas,
            gpu,
            started: now,
            last_instant: now,
            last_tension: None,
            fallback: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let time = (now - self.started).as_secs_f32();

        if let MicState::On(mic) = &mut *self.app.mic.borrow_mut() {
            mic.sample();
        }

        let (w, h) = (self.canvas.width(), self.canvas.height());
        {
            let mut camera = self.app.camera.borrow_mut();
            camera.set_aspect(input::aspect_ratio(w, h));
            camera.update(dt_sec);
        }

        let expansion = match &mut self.gpu {
            Some(g) => {
                g.resize_if_needed(w, h);
                let camera = self.app.camera.borrow();
                let mut engine = self.app.engine.borrow_mut();
                match g.render(&mut engine, &camera, time) {
                    Ok(report) => report.expansion,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        g.reconfigure();
                        engine.expansion()
                    }
                    Err(e) => {
                        log::error!("render error: {:?}", e);
                        engine.expansion()
                    }
                }
            }
            // no GPU: keep the engine advancing so the API stays live
            None => self.app.engine.borrow_mut().frame(time, &mut self.fallback).expansion,
        };

        let tension = input::tension_percent(expansion);
        if self.last_tension != Some(tension) {
            overlay::set_tension(&self.app.document, tension);
            self.last_tension = Some(tension);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, particle_count: usize) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, particle_count).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until the app's
/// `LoopControl` is stopped, then drop the callback.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let control = frame_ctx.borrow().app.control.clone();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !control.is_running() {
            log::info!("[loop] stopped");
            // breaks the Rc cycle so the closure is freed
            tick_clone.borrow_mut().take();
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}
