//! # UI Error Types
//!
//! Usage errors abort the frame. Resource errors are reported by the
//! collaborator that owns the resource and never reach `Ui::run`.

use thiserror::Error;

/// Errors that can abort a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A pass ended with groups still open.
    #[error("pass ended with {open} unclosed group(s); missing end_group()")]
    UnbalancedGroups {
        /// Number of groups still open.
        open: usize,
    },

    /// `end_group` was called with no open group.
    #[error("end_group() called with no open group")]
    GroupUnderflow,

    /// A group-scoped call was made at the top level.
    #[error("{call}() must be called between start_group() and end_group()")]
    NoOpenGroup {
        /// Name of the offending call.
        call: &'static str,
    },

    /// `end_scroll` without a matching `start_scroll` in the same group.
    #[error("end_scroll() without start_scroll() in the current group")]
    ScrollNotStarted,

    /// `end_slider` without a matching `start_slider` in the same group.
    #[error("end_slider() without start_slider() in the current group")]
    SliderNotStarted,

    /// Session configuration could not be used.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading session configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// OS error text.
        reason: String,
    },

    /// Config file is not valid TOML for `UiConfig`.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while loading a UI document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Document file could not be read.
    #[error("failed to read document {path}: {reason}")]
    Io {
        /// Path that was read.
        path: String,
        /// OS error text.
        reason: String,
    },

    /// Document is not valid TOML for `UiDocument`.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Document declares no nodes.
    #[error("document has no nodes")]
    Empty,

    /// Two nodes share an id.
    #[error("node id {0:?} is declared twice")]
    DuplicateId(String),
}

/// Errors reported by a `FontProvider`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    /// No font is loaded.
    #[error("no font loaded")]
    NoFont,

    /// The run contains characters the font cannot shape.
    #[error("font cannot shape {0:?}")]
    MissingGlyphs(String),
}

/// Result type for frame operations.
pub type UiResult<T> = Result<T, UiError>;
