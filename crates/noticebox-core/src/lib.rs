#![forbid(unsafe_code)]

//! Host-agnostic modal dialog controller for noticebox.
//!
//! The crate owns every decision the dialog makes (when to open, when to
//! close, where focus goes) and none of the plumbing. A host supplies a
//! [`Dom`] implementation, forwards [`DomEvent`]s, and executes the
//! [`ScheduledTask`]s the controller emits. The browser host lives in
//! `noticebox-web`; [`MemoryDom`] and [`Harness`] form a headless host used
//! by the test suites.
//!
//! # Lifecycle
//!
//! ```text
//!            open()               next frame
//! Closed ────────────▶ Opening ────────────▶ Open
//!   ▲                                          │ close()
//!   │        close delay (220 ms)              ▼
//!   └──────────────────────────────────── Closing
//! ```
//!
//! # Example
//!
//! ```
//! use noticebox_core::{DomEvent, Harness, MemoryDom, ModalConfig, ModalController};
//!
//! let (dom, ids) = MemoryDom::notice_page();
//! let controller = ModalController::install(dom, ModalConfig::default())?;
//! let mut harness = Harness::new(controller);
//!
//! harness.dispatch(DomEvent::Click { target: ids.trigger });
//! harness.next_frame();
//! assert!(harness.controller().is_open());
//! # Ok::<(), noticebox_core::MarkupError>(())
//! ```

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod event;
pub mod harness;
pub mod markup;
pub mod memory;
pub mod schedule;

pub use config::{MarkupSelectors, ModalConfig, ModalTiming};
pub use controller::{CloseReason, DialogState, ListenerSet, ModalController};
pub use dom::{Dom, closest_with_attribute};
pub use error::MarkupError;
pub use event::{DomEvent, Key};
pub use harness::Harness;
pub use markup::{DialogMarkup, TriggerDescriptor};
pub use memory::{MemoryDom, NodeId, NoticePage};
pub use schedule::{Deferral, ScheduledTask, Task};
