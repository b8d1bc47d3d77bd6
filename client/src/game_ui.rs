use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, KeyboardEvent};

use math_monsters::input::is_answer_submit;

// ---------------------------------------------------------------------------
// Core helpers
// ---------------------------------------------------------------------------

fn doc() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

fn set_visible(id: &str, visible: bool) {
    if let Some(el) = doc().and_then(|d| d.get_element_by_id(id)) {
        let display = if visible {
            "display: block;"
        } else {
            "display: none;"
        };
        let _ = el.set_attribute("style", display);
    }
}

fn set_text(id: &str, text: &str) {
    if let Some(el) = doc().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}

fn answer_input() -> Option<HtmlInputElement> {
    doc()?
        .get_element_by_id("answer-input")?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

pub fn hide_instructions() {
    set_visible("instructions-overlay", false);
}

/// Show a fresh problem and hand keyboard focus to the answer box.
pub fn show_problem(question: &str, status: &str) {
    set_text("math-question", question);
    set_text("math-status", status);
    set_visible("math-overlay", true);
    if let Some(input) = answer_input() {
        input.set_value("");
        let _ = input.focus();
    }
}

pub fn hide_problem() {
    set_visible("math-overlay", false);
    if let Some(input) = answer_input() {
        let _ = input.blur();
    }
}

pub fn show_victory() {
    set_visible("victory-overlay", true);
}

pub fn hide_victory() {
    set_visible("victory-overlay", false);
}

pub fn show_game_over() {
    set_visible("game-over-flash", true);
    set_visible("game-over-overlay", true);
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

/// Call `on_submit` with the raw text of the answer box whenever Enter is pressed in it.
/// A held Enter submits once.
pub fn install_answer_handler(on_submit: impl Fn(String) + 'static) {
    let Some(input) = answer_input() else {
        log::warn!("No answer input on page");
        return;
    };
    let field = input.clone();
    let onkeydown = Closure::wrap(Box::new(move |ev: KeyboardEvent| {
        // Keep typing out of the game's key handling.
        ev.stop_propagation();
        if is_answer_submit(&ev.key(), ev.repeat()) {
            on_submit(field.value());
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = input.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref());
    onkeydown.forget();
}

/// Run `on_click` on the first click anywhere on the page.
pub fn on_first_click(on_click: impl FnOnce() + 'static) {
    let Some(doc) = doc() else { return };
    let mut on_click = Some(on_click);
    let onclick = Closure::wrap(Box::new(move |_: JsValue| {
        if let Some(f) = on_click.take() {
            f();
        }
    }) as Box<dyn FnMut(JsValue)>);
    let _ = doc.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
    onclick.forget();
}

/// Report pointer lock changes, e.g. when the browser releases the lock on Escape.
pub fn on_pointer_lock_change(on_change: impl Fn(bool) + 'static) {
    let Some(doc) = doc() else { return };
    let document = doc.clone();
    let onchange = Closure::wrap(Box::new(move |_: JsValue| {
        on_change(document.pointer_lock_element().is_some());
    }) as Box<dyn FnMut(JsValue)>);
    let _ = doc.add_event_listener_with_callback("pointerlockchange", onchange.as_ref().unchecked_ref());
    onchange.forget();
}
