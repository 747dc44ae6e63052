//! Error types and result alias for the crate.
//!
//! Stroke operations never return errors; a failed raycast or a missing template
//! simply produces an empty result. [`enum@crate::error::Error`] is only used by
//! validation: brush parameter setters, [`crate::brush::BrushDefaults::validate`]
//! and catalog selection.
use thiserror::Error;

use crate::brush::BrushId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid brush parameter: {0}")]
    InvalidBrush(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown brush {0}")]
    UnknownBrush(BrushId),
}
