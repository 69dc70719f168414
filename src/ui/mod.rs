//! DOM views for the three pages
//!
//! Views only read snapshots from `sim` and write elements; all decisions
//! happen in the controllers.

pub mod draw_page;
pub mod setup_page;
pub mod single_page;

pub use draw_page::DrawPage;
pub use setup_page::SetupPage;
pub use single_page::SinglePage;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use crate::NumberRange;
use crate::offset_for_index;
use crate::sim::MessageKind;

pub(crate) fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

pub(crate) fn button_by_id(document: &Document, id: &str) -> Option<HtmlButtonElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

/// Add or remove a class
pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Create a `<div class=...>`
pub(crate) fn div(document: &Document, class: &str) -> Option<HtmlElement> {
    let el: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
    el.set_class_name(class);
    Some(el)
}

/// Fill a `.numbers` column with one tile per value
pub(crate) fn fill_tiles(document: &Document, column: &Element, range: NumberRange) {
    for n in range.values() {
        if let Some(item) = div(document, "number") {
            item.set_text_content(Some(&n.to_string()));
            let _ = column.append_child(&item);
        }
    }
}

/// Scroll a `.numbers` column so tile `index` shows in the window
pub(crate) fn scroll_column(column: &HtmlElement, index: usize, fallback_height: f32) {
    let measured = column
        .query_selector(".number")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height() as f32)
        .unwrap_or(0.0);
    let height = if measured > 0.0 { measured } else { fallback_height };
    let offset = offset_for_index(index, height);
    let _ = column
        .style()
        .set_property("transform", &format!("translateY({}px)", offset));
}

/// Set a message line and its error/success class
pub(crate) fn show_message(el: &Element, text: &str, kind: Option<MessageKind>) {
    el.set_text_content(Some(text));
    set_class(el, "message-error", kind == Some(MessageKind::Error));
    set_class(el, "message-success", kind == Some(MessageKind::Success));
}

pub(crate) fn set_disabled(button: Option<&HtmlButtonElement>, disabled: bool) {
    if let Some(button) = button {
        button.set_disabled(disabled);
    }
}

pub fn alert(text: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(text);
    }
}
