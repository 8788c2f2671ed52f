#![forbid(unsafe_code)]

//! Events a host forwards to the controller.

/// Keyboard key, as reported by `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Interpret a `KeyboardEvent.key` value. Only the exact string
    /// `"Escape"` maps to [`Key::Escape`].
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Escape" => Self::Escape,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A document event relevant to the dialog.
///
/// Hosts with real event propagation deliver one click as up to three
/// events, in bubbling order: [`CloseControlClick`](Self::CloseControlClick)
/// from a listener on each close control,
/// [`BackdropClick`](Self::BackdropClick) from a listener on the backdrop, and
/// [`DocumentClick`](Self::DocumentClick) from the document. A click stopped
/// before it reaches the document never produces the last one.
/// [`Click`](Self::Click) runs that whole path at once for hosts that do not
/// model propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent<E> {
    /// A click whose originating element is `target`, routed along its full
    /// bubbling path.
    Click { target: E },
    /// A click reached one of the dialog's close controls.
    CloseControlClick,
    /// A click reached the backdrop.
    BackdropClick,
    /// A click reached the document. Only open triggers react to it.
    DocumentClick { target: E },
    /// A keydown anywhere in the document.
    KeyDown { key: Key },
    /// The document finished parsing (`DOMContentLoaded`).
    PageLoaded,
}

impl<E> DomEvent<E> {
    pub fn key(value: &str) -> Self {
        Self::KeyDown {
            key: Key::from_key_value(value),
        }
    }

    pub fn escape() -> Self {
        Self::KeyDown { key: Key::Escape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_escape_is_escape() {
        assert_eq!(Key::from_key_value("Escape"), Key::Escape);
        assert_eq!(Key::from_key_value("Esc"), Key::Other("Esc".into()));
        assert_eq!(Key::from_key_value("escape"), Key::Other("escape".into()));
    }
}
