#![forbid(unsafe_code)]

//! WASM backend for noticebox.
//!
//! Binds [`noticebox_core::ModalController`] to a real document:
//!
//! - `WebDom` implements the core `Dom` trait over `web-sys` elements.
//! - The host listens for clicks on each close control and on the backdrop,
//!   plus document-level `click` (trigger delegation) and `keydown`, and
//!   delivers a single page-load signal.
//! - Focus moves only after the controller is released, so page `focusin`
//!   handlers may call back into the modal.
//! - Scheduled tasks run through `requestAnimationFrame` and `setTimeout`.
//!
//! From JavaScript:
//!
//! ```text
//! import init, { mount } from "./pkg/noticebox_web.js";
//! await init();
//! const modal = mount();            // or mount('{"close_delay_ms": 300}')
//! modal.open("Maintenance", "Back at 10:00");
//! ```
//!
//! Only configuration parsing and the error types compile on non-wasm
//! targets.

pub mod config;
pub mod error;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;

#[cfg(target_arch = "wasm32")]
pub use bindings::{NoticeModal, mount, mount_with, start};
pub use config::parse_config;
#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
pub use error::{ConfigError, MountError};
