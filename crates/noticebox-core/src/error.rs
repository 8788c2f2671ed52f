#![forbid(unsafe_code)]

//! Install-time errors.
//!
//! Once a controller is installed nothing it does can fail; the only
//! fallible step is locating the dialog's required parts.

use thiserror::Error;

/// A required part of the dialog markup could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("dialog root #{id} not found")]
    MissingRoot { id: String },

    #[error("title target #{id} not found")]
    MissingTitle { id: String },

    #[error("body target #{id} not found")]
    MissingBody { id: String },

    #[error("no .{class} element inside the dialog root")]
    MissingPanel { class: String },

    #[error("no .{class} element inside the dialog root")]
    MissingBackdrop { class: String },
}
