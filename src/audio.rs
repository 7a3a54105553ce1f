use crate::constants::{MUSIC_AUDIO_ID, MUSIC_BUTTON_ID};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;
use xmas_core::{MusicCommand, World};

pub fn music_element(document: &web::Document) -> Option<web::HtmlAudioElement> {
    document
        .get_element_by_id(MUSIC_AUDIO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
}

/// Carry out a toggle decided by the music player and keep the button label in sync.
pub fn run_music_command(
    document: &web::Document,
    audio: &web::HtmlAudioElement,
    world: &Rc<RefCell<World>>,
    command: MusicCommand,
) {
    match command {
        MusicCommand::Pause => {
            _ = audio.pause();
            refresh_button(document, world);
        }
        MusicCommand::Play => {
            let promise = match audio.play() {
                Ok(p) => p,
                Err(e) => {
                    report_play_result(document, world, Err(format!("{:?}", e)));
                    return;
                }
            };
            let doc = document.clone();
            let world = world.clone();
            spawn_local(async move {
                let result = JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("{:?}", e));
                report_play_result(&doc, &world, result);
            });
        }
    }
}

fn report_play_result(
    document: &web::Document,
    world: &Rc<RefCell<World>>,
    result: Result<(), String>,
) {
    let outcome = world.borrow_mut().music.play_finished(result);
    refresh_button(document, world);
    if let Err(e) = outcome {
        dom::notify(&e.user_message());
    }
}

pub fn refresh_button(document: &web::Document, world: &Rc<RefCell<World>>) {
    let label = world.borrow().music.label();
    dom::set_text(document, MUSIC_BUTTON_ID, label);
}

/// Point the audio element at an uploaded file.
pub fn replace_source(audio: &web::HtmlAudioElement, file: &web::File) -> anyhow::Result<()> {
    let url = web::Url::create_object_url_with_blob(file).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    audio.set_src(&url);
    Ok(())
}
