#![forbid(unsafe_code)]

use noticebox_core::MarkupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid modal config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why the controller could not be attached to the page.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("a notice modal is already mounted on this page")]
    AlreadyMounted,

    #[error("failed to add {event} listener: {message}")]
    Listener {
        event: &'static str,
        message: String,
    },

    #[error(transparent)]
    Markup(#[from] MarkupError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
