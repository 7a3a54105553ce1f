use crate::constants::{CLICK_SLOP_PX, PINCH_STEP_PX, WHEEL_STEP_PX};
use crate::dom;
use crate::input::{self, DragState, PointerTracker};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xmas_core::{TapOutcome, World};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub world: Rc<RefCell<World>>,
    pub drag: Rc<RefCell<DragState>>,
    pub pointers: Rc<RefCell<PointerTracker>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointercancel(&w);
    wire_wheel(&w);
    wire_touchstart(&w);
}

fn canvas_ndc(canvas: &web::HtmlCanvasElement, client_x: f32, client_y: f32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_ndc(
        Vec2::new(client_x, client_y),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let down = w.pointers.borrow_mut().down(ev.pointer_id(), pos);
        // A second finger turns the gesture into a pinch; the orbit drag stops.
        if down == 1 {
            w.drag.borrow_mut().begin(ev.pointer_id(), pos);
        } else {
            w.drag.borrow_mut().cancel();
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let pinch = w
            .pointers
            .borrow_mut()
            .move_to(ev.pointer_id(), pos, PINCH_STEP_PX);
        if let Some(steps) = pinch {
            w.world.borrow_mut().orbit.zoom(steps);
            return;
        }
        let delta = {
            let mut drag = w.drag.borrow_mut();
            if !drag.active || drag.pointer_id != ev.pointer_id() {
                return;
            }
            drag.advance(pos, CLICK_SLOP_PX)
        };
        let height = w.canvas.get_bounding_client_rect().height() as f32;
        w.world.borrow_mut().orbit.rotate(delta, height);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.pointers.borrow_mut().up(ev.pointer_id());
        let was_click = {
            let mut drag = w.drag.borrow_mut();
            if drag.pointer_id != ev.pointer_id() {
                return;
            }
            drag.finish()
        };
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        // Touch taps go through the delayed touchstart queue instead.
        if !was_click || ev.pointer_type() == "touch" {
            return;
        }
        let ndc = canvas_ndc(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        let outcome = w.world.borrow_mut().click(ndc);
        log::debug!("[click] ({:.2},{:.2}) -> {:?}", ndc.x, ndc.y, outcome);
        if outcome == TapOutcome::Unfocused {
            log::info!("[click] returning to overview");
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointercancel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut pointers = w.pointers.borrow_mut();
        pointers.up(ev.pointer_id());
        log::debug!("[touch] pointer cancelled, {} still down", pointers.count());
        let mut drag = w.drag.borrow_mut();
        if drag.pointer_id == ev.pointer_id() {
            drag.cancel();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let steps = input::wheel_steps(ev.delta_y(), WHEEL_STEP_PX);
        w.world.borrow_mut().orbit.zoom(steps);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_touchstart(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let touches = ev.touches();
        let count = touches.length() as usize;
        let Some(first) = touches.get(0) else {
            return;
        };
        let ndc = canvas_ndc(&w.canvas, first.client_x() as f32, first.client_y() as f32);
        if w.world.borrow_mut().touch_start(count, ndc, dom::now_ms()) {
            log::debug!("[touch] queued tap at ({:.2},{:.2})", ndc.x, ndc.y);
        }
    }) as Box<dyn FnMut(_)>);

    _ = canvas_for_listener
        .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
    closure.forget();
}
