//! Utility functions shared by the bid workspace components.
//!
//! - **User Feedback**: temporary "toast" notifications for saves, status
//!   changes and failed requests.
//! - **Notes Rendering**: stage notes are markdown; they are escaped first and
//!   then rendered with `pulldown_cmark`.
//! - **Hashing**: MD5 digests of serialized form values, used to tell whether
//!   a stage form has unsaved changes.
//! - **Formatting**: Indian-grouped rupee amounts for bid values.

use js_sys::Reflect;
use num_format::{Locale, ToFormattedString};
use pulldown_cmark::{html, Parser};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BeforeUnloadEvent, HtmlElement};
use yew::virtual_dom::AttrValue;

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast removes itself after three seconds. Messages are set as text, so
/// server-provided strings are safe to pass.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Escapes special HTML characters in a string.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders stage notes as HTML. Raw HTML in the notes is escaped before
/// parsing, so only markdown formatting survives.
pub fn render_notes(notes: &str) -> AttrValue {
    let escaped = escape_html(notes);
    let mut html_output = String::new();
    html::push_html(&mut html_output, Parser::new(&escaped));
    AttrValue::from(html_output)
}

/// Computes the MD5 hash of a string and returns it as a hex digest.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Bid value in rupees with Indian digit grouping, e.g. `₹25,00,000`.
pub fn format_inr(value: f64) -> String {
    format!("₹{}", (value.round() as i64).to_formatted_string(&Locale::en_IN))
}

/// Sets the global `app_dirty` flag read by the page's `beforeunload` hook.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}

/// Warns before leaving the page while the `app_dirty` flag is set.
pub fn install_unload_guard() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let guard = Closure::<dyn FnMut(BeforeUnloadEvent)>::new(|event: BeforeUnloadEvent| {
        let dirty = web_sys::window()
            .and_then(|w| Reflect::get(&w, &JsValue::from_str("app_dirty")).ok())
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);
        if dirty {
            event.prevent_default();
            event.set_return_value("You have unsaved changes.");
        }
    });
    let _ = window.add_event_listener_with_callback("beforeunload", guard.as_ref().unchecked_ref());
    guard.forget();
}
