#![allow(dead_code)]

//! Page helpers shared by the browser tests.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, EventInit, EventTarget, HtmlElement, KeyboardEvent, KeyboardEventInit,
};

/// Stock dialog plus one trigger. The panel has an id so tests can attach
/// their own listeners to it.
pub const MARKUP: &str = r#"
<button id="opener" data-modal-open data-title="Hi" data-body="Bye">Open</button>
<div id="noticeModal" class="modal hidden" aria-hidden="true">
  <div id="backdrop" class="modal-backdrop"></div>
  <div id="panel" class="modal-panel" tabindex="-1">
    <h2 id="modalTitle">Notice</h2>
    <button id="dismiss" data-modal-close>&times;</button>
    <p id="modalBody"></p>
    <button id="inner-trigger" data-modal-open data-title="Nested">More</button>
    <button id="ok" data-modal-close><span id="ok-label">OK</span></button>
  </div>
</div>
"#;

pub fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn render(markup: &str) {
    document().body().unwrap().set_inner_html(markup);
}

pub fn by_id(id: &str) -> Element {
    document().get_element_by_id(id).unwrap()
}

pub fn click(id: &str) {
    by_id(id).dyn_into::<HtmlElement>().unwrap().click();
}

/// Bubbling synthetic click, for elements without `HTMLElement.click()`.
pub fn dispatch_click(id: &str) {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    by_id(id).dispatch_event(&event).unwrap();
}

pub fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    document().dispatch_event(&event).unwrap();
}

pub fn is_hidden(id: &str) -> bool {
    by_id(id).class_list().contains("hidden")
}

pub fn text(id: &str) -> Option<String> {
    by_id(id).text_content()
}

/// Attach a page-lifetime listener from the test itself.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let listener = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .unwrap();
    listener.forget();
}

pub async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}
