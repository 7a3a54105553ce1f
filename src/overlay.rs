use crate::constants::{LOADING_FADE_DELAY_MS, LOADING_ID, LOADING_REMOVE_DELAY_MS, UI_FULL_OPACITY, UI_PANEL_ID};
use crate::dom;
use web_sys as web;
use xmas_core::constants::UI_DIMMED_OPACITY;

/// Fade the loading screen out, then drop it from the DOM.
pub fn schedule_loading_fade(document: &web::Document) {
    let doc = document.clone();
    dom::set_timeout(LOADING_FADE_DELAY_MS, move || {
        if let Some(el) = dom::html_element(&doc, LOADING_ID) {
            dom::set_opacity(&el, 0.0);
            dom::set_timeout(LOADING_REMOVE_DELAY_MS, move || el.remove());
        }
    });
}

/// Dim the control panel while an ornament fills the view.
pub fn set_panel_dimmed(document: &web::Document, dimmed: bool) {
    if let Some(el) = dom::html_element(document, UI_PANEL_ID) {
        dom::set_opacity(
            &el,
            if dimmed {
                UI_DIMMED_OPACITY
            } else {
                UI_FULL_OPACITY
            },
        );
    }
}
