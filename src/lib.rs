#![cfg(target_arch = "wasm32")]
use kinetic_core::{EngineParams, LoopControl, OrbitCamera, ParticleEngine, ShapeKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

pub use app::{set_color, set_controller_connected, set_expansion, set_shape, shutdown, toggle_audio};

use app::App;
use constants::*;

fn load_params() -> EngineParams {
    let query = dom::query_string();
    EngineParams::from_query(&query).unwrap_or_else(|e| {
        log::warn!("[config] {}; using defaults", e);
        EngineParams::default()
    })
}

fn wire_controls(app: &Rc<App>) {
    let document = &app.document;
    for kind in ShapeKind::ALL {
        let app_click = Rc::clone(app);
        let id = format!("{SHAPE_BUTTON_PREFIX}{}", kind.id());
        dom::add_click_listener(document, &id, move || app_click.select_shape(kind));
    }

    let app_audio = Rc::clone(app);
    dom::add_click_listener(document, AUDIO_BUTTON_ID, move || audio::toggle(&app_audio));

    let app_color = Rc::clone(app);
    dom::add_input_listener(document, COLOR_INPUT_ID, move |value| {
        app_color.apply_color(&value)
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kinetic-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::set_status(&document, &format!("Failed to start: {e}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let params = load_params();
    let engine = ParticleEngine::new(&params);
    let camera = OrbitCamera::new(input::aspect_ratio(canvas.width(), canvas.height()));
    let app = Rc::new(App {
        expansion: engine.expansion_handle(),
        engine: Rc::new(RefCell::new(engine)),
        camera: Rc::new(RefCell::new(camera)),
        mic: RefCell::new(audio::MicState::Off),
        control: LoopControl::new(),
        document: document.clone(),
    });
    app::install(Rc::clone(&app));

    overlay::set_shape(&document, params.initial_shape);
    overlay::set_audio_button(&document, false);
    overlay::set_tension(&document, 0);
    dom::set_input_value(&document, COLOR_INPUT_ID, &params.color.to_hex());
    wire_controls(&app);
    events::wire_global_keydown(Rc::clone(&app));
    events::wire_input_handlers(events::pointer::InputWiring {
        canvas: canvas.clone(),
        app: Rc::clone(&app),
        drag: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu = frame::init_gpu(&canvas, params.particle_count).await;
    if gpu.is_none() {
        overlay::set_status(&document, "WebGPU unavailable");
    } else {
        overlay::set_status(&document, "Waiting for controller");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(app, canvas, gpu)));
    frame::start_loop(frame_ctx);
    Ok(())
}
