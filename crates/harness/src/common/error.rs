//! Harness Error Definitions.
//!
//! This module defines the error types surfaced by the harness. It provides:
//! 1. **Image Errors:** Malformed program-image input, fatal at startup.
//! 2. **Harness Errors:** The top-level error for a simulation run.
//!
//! Out-of-range bus accesses and core-signaled traps are deliberately absent
//! here: both are defined behavior, absorbed or reported by the sequencer
//! without becoming an `Err`.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while parsing a program image.
///
/// A corrupt image invalidates the entire run, so these are never recovered
/// from; a *missing* image file is not an error (the loader substitutes the
/// fallback program instead).
#[derive(Debug, Error)]
pub enum ImageError {
    /// A line held a token that does not parse as a 32-bit hexadecimal word.
    #[error("malformed word '{token}' on line {line}: {source}")]
    MalformedWord {
        /// 1-based line number in the image file.
        line: usize,
        /// The offending token as it appeared.
        token: String,
        /// Underlying integer-parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Top-level error type for a simulation run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The program image could not be parsed.
    #[error("program image error: {0}")]
    Image(#[from] ImageError),

    /// The trace sink failed to accept a snapshot or to finish cleanly.
    #[error("trace output error: {0}")]
    Trace(#[from] io::Error),
}
