//! Common utilities and types used throughout the co-simulation harness.
//!
//! This module provides fundamental building blocks shared across all components
//! of the harness. It includes:
//! 1. **Constants:** Word store sizing, bus geometry, and the fallback program.
//! 2. **Error Handling:** Image-parse and trace-output error types.

/// Common constants used throughout the harness.
pub mod constants;

/// Error types for image loading and trace output.
pub mod error;

pub use constants::{FALLBACK_PROGRAM, FILLER_WORD, MIN_STORE_WORDS};
pub use error::{HarnessError, ImageError};
