use crate::audio;
use crate::constants::{
    CAM_BUTTON_ID, MUSIC_BUTTON_ID, MUSIC_INPUT_ID, PHOTO_INPUT_ID, THEME_INPUT_ID, TITLE_SELECTOR,
};
use crate::dom;
use crate::render::GpuState;
use crate::webcam;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use xmas_core::{header_title, is_image_mime, PhotoHandle, World};

#[derive(Clone)]
pub struct UiWiring {
    pub document: web::Document,
    pub world: Rc<RefCell<World>>,
    pub gpu: Rc<RefCell<Option<GpuState<'static>>>>,
    pub tracker: Rc<RefCell<Option<JsValue>>>,
}

pub fn wire_ui_controls(w: UiWiring) {
    wire_music_button(&w);
    wire_music_upload(&w);
    wire_photo_upload(&w);
    wire_cam_button(&w);
    wire_theme_input(&w);
    audio::refresh_button(&w.document, &w.world);
}

fn input_from_event(ev: &web::Event) -> Option<web::HtmlInputElement> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
}

fn wire_music_button(w: &UiWiring) {
    let Some(audio_el) = audio::music_element(&w.document) else {
        log::warn!("[music] no audio element; music controls disabled");
        return;
    };
    let w2 = w.clone();
    dom::add_click_listener(&w.document, MUSIC_BUTTON_ID, move || {
        let command = w2.world.borrow_mut().music.toggle();
        audio::run_music_command(&w2.document, &audio_el, &w2.world, command);
    });
}

fn wire_music_upload(w: &UiWiring) {
    let w2 = w.clone();
    dom::add_event_listener(&w.document, MUSIC_INPUT_ID, "change", move |ev| {
        let Some(file) = input_from_event(&ev)
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        let accepted = w2
            .world
            .borrow_mut()
            .music
            .accept_track(&file.type_(), &file.name());
        match accepted {
            Ok(message) => {
                if let Some(audio_el) = audio::music_element(&w2.document) {
                    if let Err(e) = audio::replace_source(&audio_el, &file) {
                        log::error!("[music] {:?}", e);
                    }
                }
                audio::refresh_button(&w2.document, &w2.world);
                dom::notify(&message);
            }
            Err(e) => dom::notify(&e.user_message()),
        }
    });
}

fn wire_photo_upload(w: &UiWiring) {
    let w2 = w.clone();
    dom::add_event_listener(&w.document, PHOTO_INPUT_ID, "change", move |ev| {
        let Some(files) = input_from_event(&ev).and_then(|input| input.files()) else {
            return;
        };
        for i in 0..files.length() {
            let Some(file) = files.get(i) else {
                continue;
            };
            if !is_image_mime(&file.type_()) {
                log::warn!("[upload] skipping {} ({})", file.name(), file.type_());
                continue;
            }
            let world = w2.world.clone();
            let gpu = w2.gpu.clone();
            spawn_local(async move {
                match decode_image(&file).await {
                    Ok(bitmap) => {
                        let mut wm = world.borrow_mut();
                        let handle = PhotoHandle(wm.scene.ornaments.len() as u32);
                        if let Some(g) = gpu.borrow_mut().as_mut() {
                            g.upload_photo(handle, &bitmap);
                        }
                        wm.add_photo(handle);
                    }
                    Err(e) => log::error!("[upload] could not decode {}: {:?}", file.name(), e),
                }
            });
        }
    });
}

async fn decode_image(file: &web::File) -> anyhow::Result<web::ImageBitmap> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let promise = window
        .create_image_bitmap_with_blob(file)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let bitmap = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    bitmap
        .dyn_into::<web::ImageBitmap>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

fn wire_cam_button(w: &UiWiring) {
    let w2 = w.clone();
    dom::add_click_listener(&w.document, CAM_BUTTON_ID, move || {
        let (document, world, tracker) = (w2.document.clone(), w2.world.clone(), w2.tracker.clone());
        spawn_local(async move {
            if let Err(e) = webcam::enable(document, world, tracker).await {
                log::error!("[webcam] {}", e);
                dom::notify(&e.user_message());
            }
        });
    });
}

fn wire_theme_input(w: &UiWiring) {
    let document = w.document.clone();
    dom::add_event_listener(&w.document, THEME_INPUT_ID, "input", move |ev| {
        let Some(input) = input_from_event(&ev) else {
            return;
        };
        let title = header_title(&input.value());
        if let Ok(Some(el)) = document.query_selector(TITLE_SELECTOR) {
            el.set_text_content(Some(&title));
        }
    });
}
