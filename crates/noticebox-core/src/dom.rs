#![forbid(unsafe_code)]

//! The slice of the document the controller needs.
//!
//! [`Dom`] is deliberately small: attribute and class access, text content,
//! parent traversal, a couple of lookups, and focus. Every mutation is
//! best-effort; implementations swallow host failures instead of reporting
//! them, because the controller has no error surface at runtime.

use std::fmt::Debug;

/// Document access used by [`ModalController`](crate::ModalController).
///
/// `Element` is a cheap handle (an index, or a reference-counted host
/// object). Two handles compare equal when they name the same node.
pub trait Dom {
    /// Handle to a node in the document.
    type Element: Clone + PartialEq + Debug;

    /// Look an element up by its `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First descendant of `scope`, in document order, carrying `class`.
    fn first_with_class(&self, scope: &Self::Element, class: &str) -> Option<Self::Element>;

    /// All descendants of `scope`, in document order, carrying attribute `name`.
    fn all_with_attribute(&self, scope: &Self::Element, name: &str) -> Vec<Self::Element>;

    /// Parent element, or `None` at the document root.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn add_class(&mut self, element: &Self::Element, class: &str);

    fn remove_class(&mut self, element: &Self::Element, class: &str);

    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// The element currently holding keyboard focus.
    fn active_element(&self) -> Option<Self::Element>;

    /// Whether `element` can still take focus (attached and focusable).
    fn can_focus(&self, element: &Self::Element) -> bool;

    fn focus(&mut self, element: &Self::Element);

    /// First descendant of `scope` carrying attribute `name`.
    fn first_with_attribute(&self, scope: &Self::Element, name: &str) -> Option<Self::Element> {
        self.all_with_attribute(scope, name).into_iter().next()
    }

    /// Whether `element` is `ancestor` or sits somewhere below it.
    fn is_inclusive_descendant(&self, element: &Self::Element, ancestor: &Self::Element) -> bool {
        let mut cursor = Some(element.clone());
        while let Some(node) = cursor {
            if &node == ancestor {
                return true;
            }
            cursor = self.parent(&node);
        }
        false
    }
}

/// Walk from `element` towards the root and return the first node carrying
/// attribute `name`, starting with `element` itself.
pub fn closest_with_attribute<D: Dom + ?Sized>(
    dom: &D,
    element: &D::Element,
    name: &str,
) -> Option<D::Element> {
    let mut cursor = Some(element.clone());
    while let Some(node) = cursor {
        if dom.has_attribute(&node, name) {
            return Some(node);
        }
        cursor = dom.parent(&node);
    }
    None
}
