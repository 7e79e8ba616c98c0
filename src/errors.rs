//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AnimusError`] covers the crate's cold-path failure
//! modes: configuration loading and validation. The per-tick motion path has
//! no error route at all: missing state lazily default-initializes and
//! degenerate numeric inputs are guarded rather than reported.
//!
//! # Usage
//!
//! Fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, AnimusError>`.

use thiserror::Error;

/// The main error type for the Animus motion core.
#[derive(Error, Debug)]
pub enum AnimusError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// File I/O error while reading a configuration file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error in a configuration document.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Alias for `Result<T, AnimusError>`.
pub type Result<T> = std::result::Result<T, AnimusError>;
