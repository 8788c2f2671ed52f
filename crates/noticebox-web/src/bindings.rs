#![forbid(unsafe_code)]

//! JavaScript entry points.

use std::cell::RefCell;
use std::rc::Rc;

use noticebox_core::{DialogState, ModalConfig};
use wasm_bindgen::prelude::*;

use crate::config::parse_config;
use crate::error::MountError;
use crate::host::{Host, with_controller};

thread_local! {
    static MOUNTED: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Handle to the page's notice modal.
#[wasm_bindgen]
pub struct NoticeModal {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl NoticeModal {
    /// Open the dialog. Empty or missing text keeps what is displayed.
    pub fn open(&self, title: Option<String>, body: Option<String>) {
        with_controller(&self.host, |c| c.open(title.as_deref(), body.as_deref()));
    }

    pub fn close(&self) {
        with_controller(&self.host, |c| c.close());
    }

    /// Safe to call from page handlers the modal itself triggers, such as
    /// `focusin` on the element it focuses.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.host.state() == DialogState::Open
    }

    /// One of `"closed"`, `"opening"`, `"open"`, `"closing"`.
    pub fn state(&self) -> String {
        self.host.state().as_str().to_owned()
    }
}

/// Mount with an already-built config. Only one modal may be mounted per page.
pub fn mount_with(config: ModalConfig) -> Result<NoticeModal, MountError> {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return Err(MountError::AlreadyMounted);
    }
    let host = Host::mount(config)?;
    MOUNTED.with(|m| *m.borrow_mut() = Some(Rc::clone(&host)));
    Ok(NoticeModal { host })
}

/// Mount the modal, optionally overriding defaults with a JSON config.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<NoticeModal, JsError> {
    let config = parse_config(config_json.as_deref()).map_err(MountError::from);
    config
        .and_then(mount_with)
        .map_err(|err| JsError::new(&err.to_string()))
}

/// Mount with defaults, reporting failure on the console instead of throwing.
/// Pages that only need the stock behaviour call this once after `init()`.
#[wasm_bindgen]
pub fn start() {
    if let Err(err) = mount_with(ModalConfig::default()) {
        tracing::warn!(%err, "notice modal not mounted");
        web_sys::console::warn_1(&format!("noticebox: {err}").into());
    }
}
