//! Shared handles for the running page and the JS-facing API.
//!
//! External controllers (a gesture mapper, a remote inference client) call
//! the `#[wasm_bindgen]` functions below; they all route through the single
//! [`App`] registered by `init`.

use crate::audio::{self, MicState};
use crate::overlay;
use kinetic_core::{ExpansionHandle, LoopControl, OrbitCamera, ParticleEngine, Rgb, ShapeKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub struct App {
    pub engine: Rc<RefCell<ParticleEngine>>,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub expansion: ExpansionHandle,
    pub mic: RefCell<MicState>,
    pub control: LoopControl,
    pub document: web::Document,
}

impl App {
    pub fn select_shape(&self, kind: ShapeKind) {
        if self.engine.borrow_mut().set_shape(kind) {
            log::info!("[shape] {}", kind.label());
        }
        overlay::set_shape(&self.document, kind);
    }

    pub fn apply_color(&self, hex: &str) {
        match Rgb::from_hex(hex) {
            Ok(color) => self.engine.borrow_mut().set_color(color),
            Err(e) => log::warn!("[color] {}", e),
        }
    }

    pub fn set_controller_connected(&self, connected: bool) {
        self.camera.borrow_mut().auto_rotate = !connected;
        overlay::set_status(
            &self.document,
            if connected {
                "Controller connected"
            } else {
                "Waiting for controller"
            },
        );
    }
}

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

pub fn install(app: Rc<App>) {
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

fn with_app(f: impl FnOnce(&Rc<App>)) {
    let app = APP.with(|slot| slot.borrow().clone());
    match app {
        Some(app) => f(&app),
        None => log::warn!("[api] called before init finished"),
    }
}

/// Push a new expansion target in \[0, 1\]; out-of-range values are clamped.
#[wasm_bindgen]
pub fn set_expansion(value: f32) {
    with_app(|app| app.expansion.set_target(value));
}

/// Switch shape by identifier (e.g. `"GALAXY"`). Unknown ids fall back to
/// the Big Bang ball.
#[wasm_bindgen]
pub fn set_shape(id: &str) {
    let kind = ShapeKind::from_id_or_fallback(id);
    with_app(|app| app.select_shape(kind));
}

#[wasm_bindgen]
pub fn set_color(hex: &str) {
    with_app(|app| app.apply_color(hex));
}

/// While a controller is connected the camera stops auto-rotating.
#[wasm_bindgen]
pub fn set_controller_connected(connected: bool) {
    with_app(|app| app.set_controller_connected(connected));
}

#[wasm_bindgen]
pub fn toggle_audio() {
    with_app(audio::toggle);
}

/// Stop the render loop and release the microphone.
#[wasm_bindgen]
pub fn shutdown() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    let Some(app) = app else {
        return;
    };
    app.control.stop();
    if let MicState::On(mic) = std::mem::take(&mut *app.mic.borrow_mut()) {
        mic.stop();
    }
    app.engine.borrow_mut().detach_audio();
    overlay::set_status(&app.document, "Stopped");
}
