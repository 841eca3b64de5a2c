//! Error type for the sunflower library.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Generation itself never fails: degenerate numbers (zero dots, negative
//! spacing) are clamped into a degenerate pattern instead. Errors only come
//! from the edges of the library, where text from a file or the command line
//! is turned into a `Config`, and from the preset store's file access.
//!
//! `thiserror` writes the `Display` and `std::error::Error` impls for us, and
//! `#[from]` lets `?` convert io/json errors automatically.

use thiserror::Error;

/// Errors raised while parsing configuration or touching the preset store.
#[derive(Error, Debug)]
pub enum Error {
    /// A pattern type name that is not one of the supported variants.
    #[error("Unknown pattern type: '{0}'")]
    UnknownPattern(String),

    /// A categorical option (gradient, fill mode, hole size) with an unknown value.
    #[error("Unknown {kind}: '{value}'")]
    UnknownOption { kind: &'static str, value: String },

    /// A color string that is not valid SVG color syntax.
    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    /// Preset names must contain something other than whitespace.
    #[error("Invalid preset name: '{0}'")]
    InvalidPresetName(String),

    /// No preset stored under that name.
    #[error("Preset not found: '{0}'")]
    PresetNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
