use crate::constants::{CAM_BUTTON_ID, CAM_WRAPPER_SELECTOR, WEBCAM_ID};
use crate::dom;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;
use xmas_core::{GestureSample, HandLandmarks, World, XmasError};

#[wasm_bindgen(module = "/web/hands.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = createHandLandmarker)]
    async fn create_hand_landmarker() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = detectHands)]
    fn detect_hands(
        landmarker: &JsValue,
        video: &web::HtmlVideoElement,
        now_ms: f64,
    ) -> Result<js_sys::Array, JsValue>;
}

/// Load the hand landmarker in the background. Gesture control stays off
/// until it resolves; a failure is logged and the rest of the page keeps working.
pub fn load_tracker(tracker: Rc<RefCell<Option<JsValue>>>) {
    wasm_bindgen_futures::spawn_local(async move {
        match create_hand_landmarker().await {
            Ok(lm) => {
                log::info!("[gesture] hand landmarker ready");
                *tracker.borrow_mut() = Some(lm);
            }
            Err(e) => {
                let err = XmasError::TrackerUnavailable(format!("{:?}", e));
                log::error!("[gesture] {}", err);
            }
        }
    });
}

/// Ask for the front camera, show the preview and start the gesture loop.
pub async fn enable(
    document: web::Document,
    world: Rc<RefCell<World>>,
    tracker: Rc<RefCell<Option<JsValue>>>,
) -> Result<(), XmasError> {
    let video = document
        .get_element_by_id(WEBCAM_ID)
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
        .ok_or_else(|| XmasError::CameraUnavailable("missing #webcam".into()))?;
    let width = world.borrow().profile().webcam_width();
    let stream = request_stream(width)
        .await
        .map_err(|e| XmasError::CameraUnavailable(format!("{:?}", e)))?;
    video.set_src_object(Some(&stream));
    _ = video.play();

    if let Some(wrapper) = document
        .query_selector(CAM_WRAPPER_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        dom::set_display(&wrapper, "block");
    }
    if let Some(btn) = dom::html_element(&document, CAM_BUTTON_ID) {
        dom::set_display(&btn, "none");
    }
    log::info!("[webcam] streaming at width {}", width);

    let mut started = false;
    let closure = Closure::wrap(Box::new(move || {
        if !started {
            started = true;
            start_gesture_loop(video.clone(), world.clone(), tracker.clone());
        }
    }) as Box<dyn FnMut()>);
    if let Some(el) = document.get_element_by_id(WEBCAM_ID) {
        _ = el.add_event_listener_with_callback("loadeddata", closure.as_ref().unchecked_ref());
    }
    closure.forget();
    Ok(())
}

async fn request_stream(width: u32) -> Result<web::MediaStream, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"facingMode".into(), &"user".into())?;
    js_sys::Reflect::set(&video, &"width".into(), &JsValue::from(width))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video);

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream = JsFuture::from(promise).await?;
    stream.dyn_into::<web::MediaStream>()
}

/// Convert the bridge's `[[[x, y, z]; 21]]` arrays into landmark sets.
/// Malformed hands are dropped.
pub fn parse_hands(raw: &js_sys::Array) -> Vec<HandLandmarks> {
    raw.iter()
        .filter_map(|hand| {
            let points = hand.dyn_into::<js_sys::Array>().ok()?;
            let pts: Option<Vec<Vec3>> = points
                .iter()
                .map(|p| {
                    let xyz = p.dyn_into::<js_sys::Array>().ok()?;
                    Some(Vec3::new(
                        xyz.get(0).as_f64()? as f32,
                        xyz.get(1).as_f64()? as f32,
                        xyz.get(2).as_f64().unwrap_or(0.0) as f32,
                    ))
                })
                .collect();
            HandLandmarks::new(pts?)
        })
        .collect()
}

/// One detection per animation frame while the camera runs.
fn start_gesture_loop(
    video: web::HtmlVideoElement,
    world: Rc<RefCell<World>>,
    tracker: Rc<RefCell<Option<JsValue>>>,
) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        detect_once(&video, &world, &tracker);
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn detect_once(
    video: &web::HtmlVideoElement,
    world: &Rc<RefCell<World>>,
    tracker: &Rc<RefCell<Option<JsValue>>>,
) {
    let tracker = tracker.borrow();
    let Some(landmarker) = tracker.as_ref() else {
        return;
    };
    let video_time = video.current_time();
    if !world.borrow().gesture.is_new_frame(video_time) {
        return;
    }
    let now_ms = dom::now_ms();
    let raw = match detect_hands(landmarker, video, now_ms) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("[gesture] detect failed: {:?}", e);
            return;
        }
    };
    let sample = GestureSample {
        video_time,
        now_ms,
        hands: parse_hands(&raw),
    };
    world.borrow_mut().gesture_sample(&sample);
}
