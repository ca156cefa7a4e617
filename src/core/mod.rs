/// Core Module for cmdpal
///
/// This module contains the shared infrastructure of the palette engine:
/// error handling and the crate-wide result alias. Everything above it
/// (filtering, session state, rendering, terminal glue) builds on these.

pub mod error;

// Re-export commonly used types for convenience
pub use error::{PaletteError, Result};
