use crate::constants::*;
use crate::dom;
use kinetic_core::ShapeKind;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HELP_OVERLAY_ID)
        .map(|el| el.class_list().contains(HIDDEN_CLASS))
        .unwrap_or(true)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, STATUS_ID, text);
}

pub fn set_tension(document: &web::Document, percent: u32) {
    dom::set_text(document, TENSION_ID, &format!("Tension: {percent}%"));
}

/// Update the label and highlight the active shape button.
pub fn set_shape(document: &web::Document, shape: ShapeKind) {
    dom::set_text(document, SHAPE_LABEL_ID, shape.label());
    for kind in ShapeKind::ALL {
        let id = format!("{SHAPE_BUTTON_PREFIX}{}", kind.id());
        dom::set_class(document, &id, ACTIVE_CLASS, kind == shape);
    }
}

pub fn set_audio_button(document: &web::Document, on: bool) {
    dom::set_class(document, AUDIO_BUTTON_ID, ACTIVE_CLASS, on);
    if let Some(el) = document.get_element_by_id(AUDIO_BUTTON_ID) {
        el.set_text_content(Some(if on { "Mic on" } else { "Mic off" }));
    }
}
