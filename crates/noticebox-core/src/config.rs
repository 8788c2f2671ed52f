#![forbid(unsafe_code)]

//! Controller configuration: timing, markup selectors, and fallback text.
//!
//! Every field has a default matching the stock notice markup, so
//! `ModalConfig::default()` is enough for a page built from `www/index.html`.
//! With the `serde` feature the whole tree deserializes from JSON; durations
//! are given in milliseconds and omitted fields keep their defaults.

use std::time::Duration;

/// Default delay between `close()` and hiding the dialog from layout.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(220);
/// Default delay between the page-load signal and the auto-open.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(150);
/// Title used when neither the trigger nor the root supplies one.
pub const DEFAULT_TITLE: &str = "Notice";

/// Deferral lengths used by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalTiming {
    /// Time given to the exit transition before the dialog leaves layout.
    #[cfg_attr(feature = "serde", serde(rename = "close_delay_ms", with = "millis"))]
    pub close_delay: Duration,
    /// Time between page load and the auto-open.
    #[cfg_attr(feature = "serde", serde(rename = "load_delay_ms", with = "millis"))]
    pub load_delay: Duration,
}

impl Default for ModalTiming {
    fn default() -> Self {
        Self {
            close_delay: DEFAULT_CLOSE_DELAY,
            load_delay: DEFAULT_LOAD_DELAY,
        }
    }
}

impl ModalTiming {
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }
}

/// How the controller finds the dialog's parts in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkupSelectors {
    /// Id of the dialog root.
    pub root_id: String,
    /// Id of the element receiving the title text.
    pub title_id: String,
    /// Id of the element receiving the body text.
    pub body_id: String,
    /// Class of the panel, searched inside the root.
    pub panel_class: String,
    /// Class of the backdrop, searched inside the root.
    pub backdrop_class: String,
    /// Class that removes the root from layout while closed.
    pub hidden_class: String,
}

impl Default for MarkupSelectors {
    fn default() -> Self {
        Self {
            root_id: "noticeModal".to_owned(),
            title_id: "modalTitle".to_owned(),
            body_id: "modalBody".to_owned(),
            panel_class: "modal-panel".to_owned(),
            backdrop_class: "modal-backdrop".to_owned(),
            hidden_class: "hidden".to_owned(),
        }
    }
}

impl MarkupSelectors {
    pub fn root_id(mut self, id: impl Into<String>) -> Self {
        self.root_id = id.into();
        self
    }

    pub fn title_id(mut self, id: impl Into<String>) -> Self {
        self.title_id = id.into();
        self
    }

    pub fn body_id(mut self, id: impl Into<String>) -> Self {
        self.body_id = id.into();
        self
    }

    pub fn panel_class(mut self, class: impl Into<String>) -> Self {
        self.panel_class = class.into();
        self
    }

    pub fn backdrop_class(mut self, class: impl Into<String>) -> Self {
        self.backdrop_class = class.into();
        self
    }

    pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }
}

/// Modal controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub timing: ModalTiming,
    pub selectors: MarkupSelectors,
    /// Title shown when a trigger or the root carries none.
    pub default_title: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            timing: ModalTiming::default(),
            selectors: MarkupSelectors::default(),
            default_title: DEFAULT_TITLE.to_owned(),
        }
    }
}

impl ModalConfig {
    pub fn timing(mut self, timing: ModalTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn selectors(mut self, selectors: MarkupSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Shorthand for overriding only the close delay.
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.timing.close_delay = delay;
        self
    }

    /// Shorthand for overriding only the load delay.
    pub fn load_delay(mut self, delay: Duration) -> Self {
        self.timing.load_delay = delay;
        self
    }
}

#[cfg(feature = "serde")]
mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
