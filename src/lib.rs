#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use xmas_core::{AnimationParams, DeviceProfile, GestureConfig, World};

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod webcam;

use constants::CANVAS_ID;

fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

fn wire_canvas_resize(
    canvas: &web::HtmlCanvasElement,
    world: &Rc<RefCell<World>>,
    max_pixel_ratio: f64,
) {
    let canvas_resize = canvas.clone();
    let world_resize = world.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize, max_pixel_ratio);
        world_resize.borrow_mut().resize(
            canvas_resize.width() as f32,
            canvas_resize.height() as f32,
        );
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("xmas-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let profile = DeviceProfile::from_user_agent(&user_agent);
    dom::sync_canvas_backing_size(&canvas, profile.max_pixel_ratio());

    let world = Rc::new(RefCell::new(World::new(
        profile,
        &AnimationParams::default(),
        GestureConfig::default(),
        canvas_aspect(&canvas),
        &mut rand::thread_rng(),
    )));
    wire_canvas_resize(&canvas, &world, profile.max_pixel_ratio());
    overlay::schedule_loading_fade(&document);

    // Hand tracking loads in the background; gestures start once the camera is enabled.
    let tracker: Rc<RefCell<Option<JsValue>>> = Rc::new(RefCell::new(None));
    webcam::load_tracker(tracker.clone());

    let snow_capacity = world.borrow().snow.len();
    let gpu = Rc::new(RefCell::new(frame::init_gpu(&canvas, snow_capacity).await));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        world: world.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
        pointers: Rc::new(RefCell::new(input::PointerTracker::default())),
    });
    events::wire_ui_controls(events::UiWiring {
        document: document.clone(),
        world: world.clone(),
        gpu: gpu.clone(),
        tracker,
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        world,
        gpu,
        canvas,
        document,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
