//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for the show / hide / lookup patterns the components
//! repeat, so `class_list` and `dyn_into` plumbing stays out of the
//! feature code.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement, HtmlSelectElement,
              HtmlTextAreaElement};

/// Make the element visible by toggling CSS classes.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Fetch an `<input>` element by id and cast it to `HtmlInputElement`.
///
/// Panics when the element is missing or of a different type. Intended for
/// *fixed* DOM fragments that should always exist.
pub fn html_input(document: &Document, id: &str) -> HtmlInputElement {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .unwrap_or_else(|| panic!("<input id='{}'> not found or wrong type", id))
}

/// Fetch a `<textarea>` element by id, same contract as `html_input`.
pub fn html_textarea(document: &Document, id: &str) -> HtmlTextAreaElement {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
        .unwrap_or_else(|| panic!("<textarea id='{}'> not found or wrong type", id))
}

/// Fetch a `<select>` element by id, same contract as `html_input`.
pub fn html_select(document: &Document, id: &str) -> HtmlSelectElement {
    document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        .unwrap_or_else(|| panic!("<select id='{}'> not found or wrong type", id))
}

/// Toggle the `disabled` attribute on a `<button>` if it exists.
pub fn set_button_disabled(document: &Document, id: &str, disabled: bool) {
    if let Some(button) = document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(disabled);
    }
}
