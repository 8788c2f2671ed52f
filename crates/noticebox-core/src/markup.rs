#![forbid(unsafe_code)]

//! The attribute contract between page markup and the controller.
//!
//! | Attribute | Location | Meaning |
//! |---|---|---|
//! | `data-modal-open` | any element | open trigger |
//! | `data-title`, `data-body` | trigger | per-trigger text |
//! | `data-modal-close` | inside the root | close control |
//! | `data-open-on-load` | root | `"true"` enables auto-open |
//! | `data-default-title`, `data-default-body` | root | auto-open text |
//! | `aria-hidden` | root | written by the controller |

use crate::config::ModalConfig;
use crate::dom::Dom;
use crate::error::MarkupError;

pub const ATTR_OPEN_TRIGGER: &str = "data-modal-open";
pub const ATTR_TITLE: &str = "data-title";
pub const ATTR_BODY: &str = "data-body";
pub const ATTR_CLOSE_CONTROL: &str = "data-modal-close";
pub const ATTR_OPEN_ON_LOAD: &str = "data-open-on-load";
pub const ATTR_DEFAULT_TITLE: &str = "data-default-title";
pub const ATTR_DEFAULT_BODY: &str = "data-default-body";
pub const ATTR_ARIA_HIDDEN: &str = "aria-hidden";

/// Resolved handles to the dialog's parts.
///
/// Close controls are collected once; controls added to the document later
/// are not wired.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogMarkup<E> {
    pub root: E,
    pub panel: E,
    pub backdrop: E,
    pub title: E,
    pub body: E,
    pub close_controls: Vec<E>,
}

impl<E: Clone + PartialEq + std::fmt::Debug> DialogMarkup<E> {
    /// Locate every required part using `config.selectors`.
    pub fn resolve<D>(dom: &D, config: &ModalConfig) -> Result<Self, MarkupError>
    where
        D: Dom<Element = E> + ?Sized,
    {
        let selectors = &config.selectors;
        let root = dom
            .element_by_id(&selectors.root_id)
            .ok_or_else(|| MarkupError::MissingRoot {
                id: selectors.root_id.clone(),
            })?;
        let title = dom
            .element_by_id(&selectors.title_id)
            .ok_or_else(|| MarkupError::MissingTitle {
                id: selectors.title_id.clone(),
            })?;
        let body = dom
            .element_by_id(&selectors.body_id)
            .ok_or_else(|| MarkupError::MissingBody {
                id: selectors.body_id.clone(),
            })?;
        let panel = dom
            .first_with_class(&root, &selectors.panel_class)
            .ok_or_else(|| MarkupError::MissingPanel {
                class: selectors.panel_class.clone(),
            })?;
        let backdrop = dom
            .first_with_class(&root, &selectors.backdrop_class)
            .ok_or_else(|| MarkupError::MissingBackdrop {
                class: selectors.backdrop_class.clone(),
            })?;
        let close_controls = dom.all_with_attribute(&root, ATTR_CLOSE_CONTROL);

        Ok(Self {
            root,
            panel,
            backdrop,
            title,
            body,
            close_controls,
        })
    }
}

/// Text requested by whatever asked the dialog to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDescriptor {
    pub title: String,
    pub body: String,
}

impl TriggerDescriptor {
    /// Read `data-title` / `data-body` from a trigger element.
    pub fn from_trigger<D: Dom + ?Sized>(
        dom: &D,
        trigger: &D::Element,
        default_title: &str,
    ) -> Self {
        Self::from_attributes(dom, trigger, ATTR_TITLE, ATTR_BODY, default_title)
    }

    /// Read `data-default-title` / `data-default-body` from the dialog root.
    pub fn from_root<D: Dom + ?Sized>(dom: &D, root: &D::Element, default_title: &str) -> Self {
        Self::from_attributes(
            dom,
            root,
            ATTR_DEFAULT_TITLE,
            ATTR_DEFAULT_BODY,
            default_title,
        )
    }

    // Missing and empty attributes both fall back.
    fn from_attributes<D: Dom + ?Sized>(
        dom: &D,
        element: &D::Element,
        title_attr: &str,
        body_attr: &str,
        default_title: &str,
    ) -> Self {
        let title = dom
            .attribute(element, title_attr)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_title.to_owned());
        let body = dom.attribute(element, body_attr).unwrap_or_default();
        Self { title, body }
    }
}

/// Whether the root asks to be opened once the page has loaded.
pub fn opens_on_load<D: Dom + ?Sized>(dom: &D, root: &D::Element) -> bool {
    dom.attribute(root, ATTR_OPEN_ON_LOAD).as_deref() == Some("true")
}
