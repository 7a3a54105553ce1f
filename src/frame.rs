use crate::dom;
use crate::overlay;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use xmas_core::{CameraEvent, World};

pub struct FrameContext {
    pub world: Rc<RefCell<World>>,
    pub gpu: Rc<RefCell<Option<render::GpuState<'static>>>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let time_sec = self.started.elapsed().as_secs_f32();
        let report = self.world.borrow_mut().tick(time_sec, dom::now_ms());

        for ev in &report.camera_events {
            match ev {
                CameraEvent::FocusCompleted(node) => {
                    log::info!("[camera] arrived at ornament node {}", node.0);
                    overlay::set_panel_dimmed(&self.document, true);
                }
                CameraEvent::UnfocusCompleted => {
                    overlay::set_panel_dimmed(&self.document, false);
                }
            }
        }
        for tap in &report.taps {
            log::debug!("[touch] {:?}", tap);
        }

        if let Some(g) = self.gpu.borrow_mut().as_mut() {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&self.world.borrow()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    snow_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, snow_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
