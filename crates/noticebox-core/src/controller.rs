#![forbid(unsafe_code)]

//! The modal dialog controller.
//!
//! [`ModalController`] owns the dialog's state and is the only code that
//! mutates the dialog's attributes, classes, text and focus. It is driven
//! from outside by two calls:
//!
//! - [`dispatch`](ModalController::dispatch) for document events, and
//! - [`run`](ModalController::run) for deferred tasks the controller
//!   previously handed out through
//!   [`take_scheduled`](ModalController::take_scheduled).
//!
//! # Invariants
//!
//! - Transitions are serialized: `open` only starts from `Closed`, `close`
//!   only starts from `Open`. Every other call is a silent no-op.
//! - `aria-hidden` flips before layout visibility on close and after it on
//!   open, so assistive tech never sees a dialog that is not laid out.
//! - The focus memento lives exactly from `open` to the end of `close`.
//! - The backdrop listener is one-shot: it detaches itself before acting and
//!   is re-attached by the next completed open.
//!
//! # Failure Modes
//!
//! - No close control in the panel: focus goes to the panel itself.
//! - The memento is gone or unfocusable by the end of `close`: focus is left
//!   where it is.
//! - A second `close()` while `Closing` does not schedule a second hide.

use std::mem;

use tracing::{debug, debug_span, trace};

use crate::config::ModalConfig;
use crate::dom::{Dom, closest_with_attribute};
use crate::error::MarkupError;
use crate::event::{DomEvent, Key};
use crate::markup::{
    ATTR_ARIA_HIDDEN, ATTR_CLOSE_CONTROL, ATTR_OPEN_TRIGGER, DialogMarkup, TriggerDescriptor,
    opens_on_load,
};
use crate::schedule::{ScheduledTask, Task};

/// Lifecycle of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// Laid out, waiting for the next frame to become active.
    Opening,
    Open,
    /// Inactive for assistive tech, waiting for the exit transition.
    Closing,
}

impl DialogState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

/// What asked the dialog to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Escape,
    Backdrop,
    CloseControl,
    /// A direct [`ModalController::close`] call.
    Programmatic,
}

/// Dynamic listeners currently attached by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerSet {
    /// Document-wide Escape handler.
    pub escape: bool,
    /// One-shot click handler on the backdrop.
    pub backdrop: bool,
}

/// Single-dialog controller.
#[derive(Debug)]
pub struct ModalController<D: Dom> {
    dom: D,
    markup: DialogMarkup<D::Element>,
    config: ModalConfig,
    state: DialogState,
    last_focused: Option<D::Element>,
    listeners: ListenerSet,
    last_close: Option<CloseReason>,
    scheduled: Vec<ScheduledTask>,
}

impl<D: Dom> ModalController<D> {
    /// Resolve the dialog markup and build a controller in the `Closed`
    /// state. The document is not modified.
    pub fn install(dom: D, config: ModalConfig) -> Result<Self, MarkupError> {
        let markup = DialogMarkup::resolve(&dom, &config)?;
        debug!(
            root = %config.selectors.root_id,
            close_controls = markup.close_controls.len(),
            "modal controller installed"
        );
        Ok(Self {
            dom,
            markup,
            config,
            state: DialogState::Closed,
            last_focused: None,
            listeners: ListenerSet::default(),
            last_close: None,
            scheduled: Vec::new(),
        })
    }

    // --- Accessors ---

    #[inline]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[inline]
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    #[inline]
    pub fn markup(&self) -> &DialogMarkup<D::Element> {
        &self.markup
    }

    #[inline]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> DialogState {
        self.state
    }

    /// True only once an open has completed and until `close()` is called.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    #[inline]
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// Element that will receive focus back when the dialog finishes closing.
    pub fn focus_memento(&self) -> Option<&D::Element> {
        self.last_focused.as_ref()
    }

    pub fn last_close_reason(&self) -> Option<CloseReason> {
        self.last_close
    }

    /// Drain the tasks scheduled since the last call. The host must run
    /// each one through [`run`](Self::run) once its deferral elapses.
    pub fn take_scheduled(&mut self) -> Vec<ScheduledTask> {
        mem::take(&mut self.scheduled)
    }

    // --- Operations ---

    /// Start opening the dialog.
    ///
    /// Title and body only replace the current text when non-empty.
    pub fn open(&mut self, title: Option<&str>, body: Option<&str>) {
        if self.state != DialogState::Closed {
            trace!(state = self.state.as_str(), "open ignored");
            return;
        }

        self.last_focused = self.dom.active_element();

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.dom.set_text(&self.markup.title, title);
        }
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            self.dom.set_text(&self.markup.body, body);
        }

        self.dom
            .remove_class(&self.markup.root, &self.config.selectors.hidden_class);
        self.state = DialogState::Opening;
        let frame = ScheduledTask::next_frame(Task::CompleteOpen);
        self.scheduled.push(frame);
        debug!(?title, "modal opening");
    }

    /// Start closing the dialog.
    pub fn close(&mut self) {
        self.close_with(CloseReason::Programmatic);
    }

    fn close_with(&mut self, reason: CloseReason) {
        if self.state != DialogState::Open {
            trace!(state = self.state.as_str(), ?reason, "close ignored");
            return;
        }

        self.dom
            .set_attribute(&self.markup.root, ATTR_ARIA_HIDDEN, "true");
        self.state = DialogState::Closing;
        self.last_close = Some(reason);
        let delay = self.config.timing.close_delay;
        let hide = ScheduledTask::after(delay, Task::CompleteClose);
        self.scheduled.push(hide);
        debug!(?reason, ?delay, "modal closing");
    }

    /// Run a task previously obtained from [`take_scheduled`](Self::take_scheduled).
    pub fn run(&mut self, task: Task) {
        match task {
            Task::CompleteOpen => self.complete_open(),
            Task::CompleteClose => self.complete_close(),
            Task::AutoOpen { title, body } => self.open(Some(&title), Some(&body)),
        }
    }

    fn complete_open(&mut self) {
        if self.state != DialogState::Opening {
            trace!(state = self.state.as_str(), "stale open completion");
            return;
        }

        self.dom
            .set_attribute(&self.markup.root, ATTR_ARIA_HIDDEN, "false");
        self.state = DialogState::Open;

        let target = self
            .dom
            .first_with_attribute(&self.markup.panel, ATTR_CLOSE_CONTROL)
            .unwrap_or_else(|| self.markup.panel.clone());
        self.dom.focus(&target);

        self.listeners.escape = true;
        self.listeners.backdrop = true;
        debug!(focus = ?target, "modal open");
    }

    fn complete_close(&mut self) {
        if self.state != DialogState::Closing {
            trace!(state = self.state.as_str(), "stale close completion");
            return;
        }

        self.dom
            .add_class(&self.markup.root, &self.config.selectors.hidden_class);
        self.listeners.escape = false;

        match self.last_focused.take() {
            Some(previous) if self.dom.can_focus(&previous) => {
                self.dom.focus(&previous);
                debug!(focus = ?previous, "modal closed, focus restored");
            }
            previous => debug!(?previous, "modal closed, focus left in place"),
        }
        self.state = DialogState::Closed;
    }

    // --- Event Handling ---

    /// Route a document event.
    ///
    /// A [`DomEvent::Click`] runs the element-level handlers (close controls,
    /// then the backdrop) before the document-level trigger delegation,
    /// matching the order a bubbling click reaches them.
    pub fn dispatch(&mut self, event: &DomEvent<D::Element>) {
        let _span = debug_span!("modal_dispatch", state = self.state.as_str()).entered();
        match event {
            DomEvent::Click { target } => self.on_click(target),
            DomEvent::CloseControlClick => self.on_close_control(),
            DomEvent::BackdropClick => self.on_backdrop(),
            DomEvent::DocumentClick { target } => self.on_document_click(target),
            DomEvent::KeyDown { key } => self.on_key(key),
            DomEvent::PageLoaded => self.on_page_loaded(),
        }
    }

    fn on_click(&mut self, target: &D::Element) {
        let on_close_control = self
            .markup
            .close_controls
            .iter()
            .any(|control| self.dom.is_inclusive_descendant(target, control));
        if on_close_control {
            self.on_close_control();
        }
        let backdrop = &self.markup.backdrop;
        if self.dom.is_inclusive_descendant(target, backdrop) {
            self.on_backdrop();
        }
        self.on_document_click(target);
    }

    fn on_close_control(&mut self) {
        self.close_with(CloseReason::CloseControl);
    }

    fn on_backdrop(&mut self) {
        if !self.listeners.backdrop {
            trace!("backdrop click without listener");
            return;
        }
        self.listeners.backdrop = false;
        self.close_with(CloseReason::Backdrop);
    }

    fn on_document_click(&mut self, target: &D::Element) {
        let Some(trigger) = closest_with_attribute(&self.dom, target, ATTR_OPEN_TRIGGER) else {
            return;
        };
        let descriptor =
            TriggerDescriptor::from_trigger(&self.dom, &trigger, &self.config.default_title);
        trace!(?trigger, "open trigger clicked");
        self.open(Some(&descriptor.title), Some(&descriptor.body));
    }

    fn on_key(&mut self, key: &Key) {
        if self.listeners.escape && *key == Key::Escape {
            self.close_with(CloseReason::Escape);
        }
    }

    fn on_page_loaded(&mut self) {
        if !opens_on_load(&self.dom, &self.markup.root) {
            return;
        }
        let descriptor =
            TriggerDescriptor::from_root(&self.dom, &self.markup.root, &self.config.default_title);
        debug!(
            title = %descriptor.title,
            delay = ?self.config.timing.load_delay,
            "auto-open scheduled"
        );
        self.scheduled.push(ScheduledTask::after(
            self.config.timing.load_delay,
            Task::AutoOpen {
                title: descriptor.title,
                body: descriptor.body,
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NoticePage};
    use crate::schedule::Deferral;
    use std::time::Duration;
    use tracing_test::traced_test;

    fn controller() -> (ModalController<MemoryDom>, NoticePage) {
        let (dom, page) = MemoryDom::notice_page();
        let controller = ModalController::install(dom, ModalConfig::default()).unwrap();
        (controller, page)
    }

    fn opened() -> (ModalController<MemoryDom>, NoticePage) {
        let (mut c, page) = controller();
        c.open(Some("Title"), Some("Body"));
        for scheduled in c.take_scheduled() {
            c.run(scheduled.task);
        }
        (c, page)
    }

    #[test]
    fn install_leaves_document_untouched() {
        let (c, page) = controller();
        assert_eq!(c.state(), DialogState::Closed);
        assert!(c.dom().has_class(&page.root, "hidden"));
        assert_eq!(
            c.dom().attribute(&page.root, "aria-hidden").as_deref(),
            Some("true")
        );
        assert_eq!(c.listeners(), ListenerSet::default());
    }

    #[test]
    fn open_shows_then_activates_on_next_frame() {
        let (mut c, page) = controller();
        c.dom_mut().focus(&page.outside);

        c.open(Some("Title"), Some("Body"));
        assert_eq!(c.state(), DialogState::Opening);
        assert!(!c.is_open());
        assert!(!c.dom().has_class(&page.root, "hidden"));
        assert_eq!(
            c.dom().attribute(&page.root, "aria-hidden").as_deref(),
            Some("true")
        );
        assert_eq!(c.focus_memento(), Some(&page.outside));

        let scheduled = c.take_scheduled();
        let frame = ScheduledTask::next_frame(Task::CompleteOpen);
        assert_eq!(scheduled, vec![frame]);
        c.run(Task::CompleteOpen);

        assert!(c.is_open());
        assert_eq!(
            c.dom().attribute(&page.root, "aria-hidden").as_deref(),
            Some("false")
        );
        assert_eq!(c.dom().active_element(), Some(page.close_button));
        let armed = ListenerSet {
            escape: true,
            backdrop: true,
        };
        assert_eq!(c.listeners(), armed);
    }

    #[test]
    fn open_keeps_previous_text_for_empty_values() {
        let (mut c, page) = opened();
        c.close();
        c.run(Task::CompleteClose);

        c.open(Some(""), None);
        assert_eq!(c.dom().text(&page.title), "Title");
        assert_eq!(c.dom().text(&page.body), "Body");
    }

    #[test]
    fn open_is_ignored_unless_closed() {
        let (mut c, _) = controller();
        c.open(None, None);
        c.open(Some("Again"), None);
        assert_eq!(c.take_scheduled().len(), 1);

        c.run(Task::CompleteOpen);
        c.open(Some("Again"), None);
        assert!(c.take_scheduled().is_empty());

        c.close();
        c.open(Some("Again"), None);
        assert_eq!(c.state(), DialogState::Closing);
    }

    #[test]
    fn close_is_deferred_and_single_shot() {
        let (mut c, page) = opened();
        c.close();
        assert_eq!(c.state(), DialogState::Closing);
        assert_eq!(
            c.dom().attribute(&page.root, "aria-hidden").as_deref(),
            Some("true")
        );
        assert!(!c.dom().has_class(&page.root, "hidden"));

        c.close();
        let scheduled = c.take_scheduled();
        assert_eq!(
            scheduled,
            vec![ScheduledTask {
                deferral: Deferral::After(Duration::from_millis(220)),
                task: Task::CompleteClose,
            }]
        );

        c.run(Task::CompleteClose);
        assert_eq!(c.state(), DialogState::Closed);
        assert!(c.dom().has_class(&page.root, "hidden"));
        assert!(!c.listeners().escape);
        assert_eq!(c.focus_memento(), None);
    }

    #[test]
    fn close_while_closed_or_opening_does_nothing() {
        let (mut c, _) = controller();
        c.close();
        assert!(c.take_scheduled().is_empty());

        c.open(None, None);
        c.close();
        assert_eq!(c.state(), DialogState::Opening);
        assert_eq!(c.last_close_reason(), None);
    }

    #[test]
    fn focus_falls_back_to_panel_without_close_controls() {
        let (mut dom, page) = MemoryDom::notice_page();
        dom.remove_attribute(&page.close_button, ATTR_CLOSE_CONTROL);
        dom.remove_attribute(&page.footer_close, ATTR_CLOSE_CONTROL);
        let mut c = ModalController::install(dom, ModalConfig::default()).unwrap();

        c.open(None, None);
        c.run(Task::CompleteOpen);
        assert_eq!(c.dom().active_element(), Some(page.panel));
    }

    #[test]
    fn stale_completions_are_ignored() {
        let (mut c, page) = controller();
        c.run(Task::CompleteClose);
        assert!(c.dom().focus_log().is_empty());
        assert_eq!(c.state(), DialogState::Closed);

        c.run(Task::CompleteOpen);
        assert_eq!(c.state(), DialogState::Closed);
        assert_eq!(
            c.dom().attribute(&page.root, "aria-hidden").as_deref(),
            Some("true")
        );
    }

    #[test]
    fn close_control_records_reason() {
        let (mut c, page) = opened();
        c.dispatch(&DomEvent::Click {
            target: page.footer_close,
        });
        assert_eq!(c.state(), DialogState::Closing);
        assert_eq!(c.last_close_reason(), Some(CloseReason::CloseControl));
    }

    #[test]
    fn element_level_clicks_close_without_document_click() {
        let (mut c, _) = opened();
        c.dispatch(&DomEvent::CloseControlClick);
        assert_eq!(c.state(), DialogState::Closing);
        assert_eq!(c.last_close_reason(), Some(CloseReason::CloseControl));
        assert!(
            c.listeners().backdrop,
            "close control leaves the backdrop armed"
        );

        let (mut c, _) = opened();
        c.dispatch(&DomEvent::BackdropClick);
        assert_eq!(c.last_close_reason(), Some(CloseReason::Backdrop));
        assert!(!c.listeners().backdrop);
    }

    #[test]
    fn document_click_only_delegates_to_triggers() {
        let (mut c, page) = opened();
        for target in [page.footer_close, page.backdrop] {
            c.dispatch(&DomEvent::DocumentClick { target });
        }
        assert!(c.is_open());
        assert!(c.listeners().backdrop);

        let (mut c, page) = controller();
        c.dispatch(&DomEvent::DocumentClick {
            target: page.trigger_label,
        });
        assert_eq!(c.state(), DialogState::Opening);
        assert_eq!(c.dom().text(&page.title), "Hi");
    }

    #[test]
    fn backdrop_click_while_closed_disarms_only() {
        let (mut c, _) = opened();
        c.dispatch(&DomEvent::escape());
        c.run(Task::CompleteClose);
        assert!(c.listeners().backdrop);

        c.dispatch(&DomEvent::BackdropClick);
        assert_eq!(c.state(), DialogState::Closed);
        assert!(!c.listeners().backdrop);
        assert_eq!(c.last_close_reason(), Some(CloseReason::Escape));
    }

    #[test]
    fn escape_listener_follows_lifecycle() {
        let (mut c, _) = controller();
        c.dispatch(&DomEvent::escape());
        assert_eq!(c.state(), DialogState::Closed);

        let (mut c, _) = opened();
        c.dispatch(&DomEvent::key("Enter"));
        assert!(c.is_open());
        c.dispatch(&DomEvent::escape());
        assert_eq!(c.last_close_reason(), Some(CloseReason::Escape));
        assert!(
            c.listeners().escape,
            "detached only once the close completes"
        );
    }

    #[test]
    fn page_load_without_marker_schedules_nothing() {
        let (mut c, _) = controller();
        c.dispatch(&DomEvent::PageLoaded);
        assert!(c.take_scheduled().is_empty());
    }

    #[test]
    #[traced_test]
    fn transitions_are_logged() {
        let (mut c, _) = opened();
        c.open(None, None);
        c.close();
        assert!(logs_contain("modal controller installed"));
        assert!(logs_contain("modal open"));
        assert!(logs_contain("open ignored"));
        assert!(logs_contain("modal closing"));
        assert!(logs_contain("delay=220ms"));
    }
}
