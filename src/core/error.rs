/// cmdpal Error Module
///
/// This module defines the error types for the palette engine. It provides
/// structured error handling with proper error propagation so callers never
/// have to deal with `Result<T, String>` or mixed error types.
use thiserror::Error;

/// Comprehensive error type for the palette engine.
///
/// Covers the error scenarios that can occur while embedding a palette:
/// - Configuration loading and validation
/// - Key-binding parsing
/// - Terminal I/O from the presentation layer
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Configuration loading and validation errors (bad command map,
    /// missing toggle binding, malformed window geometry, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-binding strings that cannot be normalized to a canonical key
    #[error("Key binding error: {0}")]
    Key(String),

    /// Terminal and file I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors from the configuration file
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Type alias for Result to use PaletteError as the error type.
pub type Result<T> = std::result::Result<T, PaletteError>;
