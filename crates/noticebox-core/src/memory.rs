#![forbid(unsafe_code)]

//! Headless in-memory document.
//!
//! [`MemoryDom`] is an arena of nodes with attributes, classes, text and a
//! single focus slot. It models just enough browser behaviour for the
//! controller to be exercised without a browser:
//!
//! - `active_element()` falls back to `<body>` when nothing holds focus.
//! - Only connected, focusable nodes take focus; `focus()` on anything else
//!   is ignored, as in a browser.
//! - A node is focusable when it is an interactive tag (`button`, `a`,
//!   `input`, `select`, `textarea`) or carries `tabindex`, and is not
//!   `disabled`.

use std::collections::BTreeMap;

use crate::dom::Dom;
use crate::markup::{ATTR_BODY, ATTR_CLOSE_CONTROL, ATTR_OPEN_TRIGGER, ATTR_TITLE};

const INTERACTIVE_TAGS: [&str; 5] = ["button", "a", "input", "select", "textarea"];

/// Index of a node inside a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    connected: bool,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_owned(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            text: String::new(),
            connected: true,
        }
    }
}

/// In-memory document tree.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    body: NodeId,
    active: Option<NodeId>,
    focus_log: Vec<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create a document holding only `<body>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body", None)],
            body: NodeId(0),
            active: None,
            focus_log: Vec::new(),
        }
    }

    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new `tag` element as the last child of `parent`.
    pub fn create(&mut self, tag: &str, parent: &NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(tag, Some(*parent));
        node.connected = self.node(parent).connected;
        self.nodes.push(node);
        self.node_mut(parent).children.push(id);
        id
    }

    pub fn tag(&self, element: &NodeId) -> &str {
        &self.node(element).tag
    }

    pub fn text(&self, element: &NodeId) -> &str {
        &self.node(element).text
    }

    pub fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.node(element).classes.iter().any(|c| c == class)
    }

    pub fn remove_attribute(&mut self, element: &NodeId, name: &str) {
        self.node_mut(element).attributes.remove(name);
    }

    /// Detach `element` and its subtree from the document.
    pub fn detach(&mut self, element: &NodeId) {
        if let Some(parent) = self.node(element).parent {
            self.node_mut(&parent).children.retain(|c| c != element);
        }
        self.node_mut(element).parent = None;
        let mut pending = vec![*element];
        while let Some(id) = pending.pop() {
            let node = self.node_mut(&id);
            node.connected = false;
            pending.extend(node.children.iter().copied());
        }
        if self.active.is_some_and(|a| !self.node(&a).connected) {
            self.active = None;
        }
    }

    /// Every element that received focus, oldest first.
    pub fn focus_log(&self) -> &[NodeId] {
        &self.focus_log
    }

    fn node(&self, id: &NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: &NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn descendants(&self, scope: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(&id).children.iter().rev().copied());
        }
        out
    }

    /// Build the stock notice page used across the test suites.
    ///
    /// ```text
    /// body
    /// ├── button[data-modal-open][data-title=Hi][data-body=Bye]   trigger
    /// │   └── span                                                trigger_label
    /// ├── button                                                  outside
    /// └── div#noticeModal.hidden[aria-hidden=true]                root
    ///     ├── div.modal-backdrop                                  backdrop
    ///     └── div.modal-panel[tabindex=-1]                        panel
    ///         ├── h2#modalTitle "Notice"                          title
    ///         ├── button[data-modal-close] "×"                    close_button
    ///         ├── p#modalBody                                     body
    ///         └── button[data-modal-close] "OK"                   footer_close
    /// ```
    pub fn notice_page() -> (Self, NoticePage) {
        let mut dom = Self::new();
        let page_body = dom.body();

        let trigger = dom.create("button", &page_body);
        dom.set_attribute(&trigger, ATTR_OPEN_TRIGGER, "");
        dom.set_attribute(&trigger, ATTR_TITLE, "Hi");
        dom.set_attribute(&trigger, ATTR_BODY, "Bye");
        let trigger_label = dom.create("span", &trigger);
        dom.set_text(&trigger_label, "Read notice");

        let outside = dom.create("button", &page_body);

        let root = dom.create("div", &page_body);
        dom.set_attribute(&root, "id", "noticeModal");
        dom.set_attribute(&root, "aria-hidden", "true");
        dom.add_class(&root, "modal");
        dom.add_class(&root, "hidden");

        let backdrop = dom.create("div", &root);
        dom.add_class(&backdrop, "modal-backdrop");

        let panel = dom.create("div", &root);
        dom.add_class(&panel, "modal-panel");
        dom.set_attribute(&panel, "tabindex", "-1");

        let title = dom.create("h2", &panel);
        dom.set_attribute(&title, "id", "modalTitle");
        dom.set_text(&title, "Notice");

        let close_button = dom.create("button", &panel);
        dom.set_attribute(&close_button, ATTR_CLOSE_CONTROL, "");
        dom.set_text(&close_button, "×");

        let body = dom.create("p", &panel);
        dom.set_attribute(&body, "id", "modalBody");

        let footer_close = dom.create("button", &panel);
        dom.set_attribute(&footer_close, ATTR_CLOSE_CONTROL, "");
        dom.set_text(&footer_close, "OK");

        let page = NoticePage {
            root,
            panel,
            backdrop,
            title,
            body,
            close_button,
            footer_close,
            trigger,
            trigger_label,
            outside,
        };
        (dom, page)
    }
}

/// Handles into the page built by [`MemoryDom::notice_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticePage {
    pub root: NodeId,
    pub panel: NodeId,
    pub backdrop: NodeId,
    pub title: NodeId,
    pub body: NodeId,
    pub close_button: NodeId,
    pub footer_close: NodeId,
    pub trigger: NodeId,
    pub trigger_label: NodeId,
    pub outside: NodeId,
}

impl Dom for MemoryDom {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(&self.body)
            .into_iter()
            .find(|n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn first_with_class(&self, scope: &NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.has_class(n, class))
    }

    fn all_with_attribute(&self, scope: &NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.node(n).attributes.contains_key(name))
            .collect()
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.node(element).parent
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.node(element).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        self.node_mut(element)
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn add_class(&mut self, element: &NodeId, class: &str) {
        if !self.has_class(element, class) {
            self.node_mut(element).classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, element: &NodeId, class: &str) {
        self.node_mut(element).classes.retain(|c| c != class);
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        self.node_mut(element).text = text.to_owned();
    }

    fn active_element(&self) -> Option<NodeId> {
        Some(self.active.unwrap_or(self.body))
    }

    fn can_focus(&self, element: &NodeId) -> bool {
        let node = self.node(element);
        node.connected
            && !node.attributes.contains_key("disabled")
            && (INTERACTIVE_TAGS.contains(&node.tag.as_str())
                || node.attributes.contains_key("tabindex"))
    }

    fn focus(&mut self, element: &NodeId) {
        if self.can_focus(element) {
            self.active = Some(*element);
            self.focus_log.push(*element);
        }
    }
}
