#![forbid(unsafe_code)]

//! `web-sys` implementation of the core [`Dom`] trait.
//!
//! Every mutation ignores the `Result` the browser returns; a failed class or
//! attribute write leaves the page as it was, which is the behaviour the
//! controller expects from a best-effort document.
//!
//! Focus is the exception to "write immediately": `focus()` dispatches
//! `focus`/`focusin` synchronously, and page handlers for those may call
//! back into the modal. [`WebDom::focus`](Dom::focus) only records the
//! request; the host applies it with [`focus_element`] once the controller
//! is released.

use noticebox_core::Dom;
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Node, SvgElement};

/// Live browser document.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
    pending_focus: Option<Element>,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            pending_focus: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The element the controller last asked to focus, if not yet applied.
    pub fn take_pending_focus(&mut self) -> Option<Element> {
        self.pending_focus.take()
    }
}

/// HTML and SVG elements both expose `focus()`.
fn is_focusable(element: &Element) -> bool {
    element.is_instance_of::<HtmlElement>() || element.is_instance_of::<SvgElement>()
}

/// Move keyboard focus to `element`. Runs page focus handlers synchronously.
pub(crate) fn focus_element(element: &Element) {
    let result = if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.focus()
    } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
        svg.focus()
    } else {
        return;
    };
    if let Err(err) = result {
        trace!(?err, "focus rejected");
    }
}

/// The element an event originated from. Text-node targets resolve to their
/// parent element.
pub(crate) fn element_from_target(target: EventTarget) -> Option<Element> {
    match target.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(other) => other.dyn_into::<Node>().ok()?.parent_element(),
    }
}

impl Dom for WebDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first_with_class(&self, scope: &Element, class: &str) -> Option<Element> {
        scope.get_elements_by_class_name(class).item(0)
    }

    fn all_with_attribute(&self, scope: &Element, name: &str) -> Vec<Element> {
        let Ok(list) = scope.query_selector_all(&format!("[{name}]")) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn first_with_attribute(&self, scope: &Element, name: &str) -> Option<Element> {
        scope.query_selector(&format!("[{name}]")).ok().flatten()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_attribute(&self, element: &Element, name: &str) -> bool {
        element.has_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn active_element(&self) -> Option<Element> {
        self.pending_focus
            .clone()
            .or_else(|| self.document.active_element())
    }

    fn can_focus(&self, element: &Element) -> bool {
        element.is_connected() && is_focusable(element)
    }

    fn focus(&mut self, element: &Element) {
        self.pending_focus = Some(element.clone());
    }

    fn is_inclusive_descendant(&self, element: &Element, ancestor: &Element) -> bool {
        ancestor.contains(Some(element.as_ref()))
    }
}
