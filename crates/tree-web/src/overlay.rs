use crate::constants::HINT_ID;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip the hint's `hidden` flag. Returns whether the hint is now visible,
/// or `None` when the page has no hint element.
pub fn toggle_hint(document: &web::Document) -> Option<bool> {
    let hint = document
        .get_element_by_id(HINT_ID)?
        .dyn_into::<web::HtmlElement>()
        .ok()?;
    let visible = hint.hidden();
    hint.set_hidden(visible);
    Some(visible)
}
