#![forbid(unsafe_code)]

//! Browser event loop glue.
//!
//! The controller sits behind `Rc<Host>` shared by every listener and
//! pending callback. Each entry point borrows the controller, lets it act,
//! drains the tasks and focus request it produced, releases the borrow, and
//! only then applies the focus and hands the tasks to the browser.
//! Listeners live for the page's lifetime and are leaked with
//! `Closure::forget`.
//!
//! Clicks reach the controller the way they bubble: each close control and
//! the backdrop carry their own listener, and the document listener only
//! delegates to open triggers. A click stopped inside the dialog still
//! closes it from a close control.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use noticebox_core::{Deferral, DialogState, DomEvent, ModalConfig, ModalController, ScheduledTask};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Window};

use crate::dom::{WebDom, element_from_target, focus_element};
use crate::error::MountError;

pub(crate) struct Host {
    window: Window,
    controller: RefCell<ModalController<WebDom>>,
    /// Controller state as of the last completed entry point.
    state: Cell<DialogState>,
}

impl Host {
    /// Resolve the markup and build a host with no listeners attached.
    pub(crate) fn new(config: ModalConfig) -> Result<Rc<Self>, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;
        let controller = ModalController::install(WebDom::new(document), config)?;
        Ok(Rc::new(Self {
            window,
            state: Cell::new(controller.state()),
            controller: RefCell::new(controller),
        }))
    }

    /// Resolve the markup, install the listeners, and deliver the page-load
    /// signal.
    pub(crate) fn mount(config: ModalConfig) -> Result<Rc<Self>, MountError> {
        let host = Self::new(config)?;
        let (document, close_controls, backdrop) = {
            let controller = host.controller.borrow();
            let markup = controller.markup();
            (
                controller.dom().document().clone(),
                markup.close_controls.clone(),
                markup.backdrop.clone(),
            )
        };

        for control in &close_controls {
            listen_for(&host, control, "click", close_control_click)?;
        }
        listen_for(&host, &backdrop, "click", backdrop_click)?;
        listen_for(&host, &document, "click", document_click)?;
        listen_for(&host, &document, "keydown", key_down)?;
        install_page_load(&host, &document)?;

        debug!(controls = close_controls.len(), "notice modal mounted");
        Ok(host)
    }

    /// Current dialog state, readable even while the controller is busy.
    pub(crate) fn state(&self) -> DialogState {
        match self.controller.try_borrow() {
            Ok(controller) => controller.state(),
            Err(_) => self.state.get(),
        }
    }
}

/// Run `f` against the controller, then apply the focus and schedule the
/// tasks it produced.
pub(crate) fn with_controller(host: &Rc<Host>, f: impl FnOnce(&mut ModalController<WebDom>)) {
    let (scheduled, focus) = {
        let Ok(mut controller) = host.controller.try_borrow_mut() else {
            warn!("modal controller busy, dropping re-entrant call");
            return;
        };
        f(&mut controller);
        host.state.set(controller.state());
        let focus = controller.dom_mut().take_pending_focus();
        (controller.take_scheduled(), focus)
    };
    if let Some(element) = focus {
        focus_element(&element);
    }
    for task in scheduled {
        schedule(host, task);
    }
}

pub(crate) fn dispatch(host: &Rc<Host>, event: DomEvent<Element>) {
    with_controller(host, |controller| controller.dispatch(&event));
}

fn schedule(host: &Rc<Host>, scheduled: ScheduledTask) {
    let ScheduledTask { deferral, task } = scheduled;
    let pending = Rc::clone(host);
    let callback = Closure::once_into_js(move || {
        with_controller(&pending, |controller| controller.run(task));
    });
    let function = callback.unchecked_ref::<js_sys::Function>();

    let result = match deferral {
        Deferral::NextFrame => host.window.request_animation_frame(function).map(drop),
        Deferral::After(delay) => host
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(function, timeout_ms(delay))
            .map(drop),
    };
    if let Err(err) = result {
        warn!(?deferral, error = ?err, "failed to schedule modal task");
    }
}

fn timeout_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

fn listener_error(event: &'static str) -> impl FnOnce(wasm_bindgen::JsValue) -> MountError {
    move |err| MountError::Listener {
        event,
        message: format!("{err:?}"),
    }
}

/// Attach a page-lifetime listener that translates `event` into a
/// controller event.
fn listen_for(
    host: &Rc<Host>,
    target: &EventTarget,
    event: &'static str,
    translate: impl Fn(&Event) -> Option<DomEvent<Element>> + 'static,
) -> Result<(), MountError> {
    let listener_host = Rc::clone(host);
    let listener = Closure::<dyn FnMut(Event)>::new(move |raw: Event| {
        if let Some(event) = translate(&raw) {
            dispatch(&listener_host, event);
        }
    });
    target
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(listener_error(event))?;
    listener.forget();
    Ok(())
}

fn close_control_click(_: &Event) -> Option<DomEvent<Element>> {
    Some(DomEvent::CloseControlClick)
}

fn backdrop_click(_: &Event) -> Option<DomEvent<Element>> {
    Some(DomEvent::BackdropClick)
}

fn document_click(event: &Event) -> Option<DomEvent<Element>> {
    let target = event.target().and_then(element_from_target)?;
    Some(DomEvent::DocumentClick { target })
}

fn key_down(event: &Event) -> Option<DomEvent<Element>> {
    let key = event.dyn_ref::<KeyboardEvent>()?.key();
    Some(DomEvent::key(&key))
}

// Mounting after DOMContentLoaded has fired delivers the signal right away.
fn install_page_load(host: &Rc<Host>, document: &Document) -> Result<(), MountError> {
    if document.ready_state() != "loading" {
        dispatch(host, DomEvent::PageLoaded);
        return Ok(());
    }
    listen_for_content_loaded(host, document)
}

fn listen_for_content_loaded(host: &Rc<Host>, document: &Document) -> Result<(), MountError> {
    let load_host = Rc::clone(host);
    let on_load = Closure::once_into_js(move || dispatch(&load_host, DomEvent::PageLoaded));
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_load.unchecked_ref())
        .map_err(listener_error("DOMContentLoaded"))
}
