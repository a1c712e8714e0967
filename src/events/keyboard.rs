use crate::app::App;
use crate::audio;
use crate::constants::EXPANSION_KEY_STEP;
use crate::overlay;
use kinetic_core::controls::{action_for_key, nudged, KeyAction};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<App>) {
    // leave typing in form fields alone
    if let Some(target) = ev.target() {
        if target.dyn_ref::<web::HtmlInputElement>().is_some() {
            return;
        }
    }
    let Some(action) = action_for_key(&ev.key(), EXPANSION_KEY_STEP) else {
        return;
    };
    match action {
        KeyAction::SelectShape(kind) => app.select_shape(kind),
        KeyAction::NudgeExpansion(delta) => {
            let next = nudged(app.expansion.target(), delta);
            app.expansion.set_target(next);
            ev.prevent_default();
        }
        KeyAction::ToggleAudio => audio::toggle(app),
        KeyAction::ToggleOverlay => {
            overlay::toggle(&app.document);
            ev.prevent_default();
        }
        KeyAction::ToggleAutoRotate => {
            let mut camera = app.camera.borrow_mut();
            camera.auto_rotate = !camera.auto_rotate;
            log::info!("[keys] auto-rotate={}", camera.auto_rotate);
            ev.prevent_default();
        }
        KeyAction::Regenerate => {
            app.engine.borrow_mut().regenerate();
            log::info!("[keys] regenerated cloud");
        }
        KeyAction::ResetCamera => app.camera.borrow_mut().reset(),
    }
}

pub fn wire_global_keydown(app: Rc<App>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
