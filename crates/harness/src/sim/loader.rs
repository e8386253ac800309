//! Program image loading.
//!
//! This module reads the hex text format into the word store. It performs:
//! 1. **Parsing:** One 32-bit hexadecimal value per line; blank lines and `#` comments are skipped.
//! 2. **Fallback:** A missing or unreadable file logs a warning and substitutes a fixed four-word program.
//! 3. **Padding:** Loaded words land in file order, then the store pads itself to the minimum size.
//!
//! A file that opens but contains a malformed word is a fatal startup error:
//! a corrupt image invalidates the whole run, so nothing is substituted.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::constants::FALLBACK_PROGRAM;
use crate::common::error::ImageError;
use crate::mem::WordStore;

/// Loads the program image at `path`, substituting the fallback program when
/// the file cannot be read.
///
/// # Arguments
///
/// * `path` - Path to the hex text file.
///
/// # Errors
///
/// Returns [`ImageError::MalformedWord`] when a non-comment line fails to
/// parse as a 32-bit hexadecimal value.
pub fn load_image(path: &Path) -> Result<Vec<u32>, ImageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "could not open program image, using fallback program"
            );
            return Ok(FALLBACK_PROGRAM.to_vec());
        }
    };
    parse_image(&text)
}

/// Loads the program image at `path` into a ready word store.
///
/// # Errors
///
/// Propagates [`ImageError`] from [`load_image`].
pub fn load_store(path: &Path) -> Result<WordStore, ImageError> {
    Ok(WordStore::from_words(load_image(path)?))
}

/// Parses hex text into program words, in line order.
///
/// Lines are trimmed first; empty lines and lines starting with `#` are
/// skipped. Only the first whitespace-separated token of a line is read, and
/// an optional `0x` prefix is accepted.
///
/// # Errors
///
/// Returns [`ImageError::MalformedWord`] carrying the 1-based line number
/// and offending token when a value fails to parse.
pub fn parse_image(text: &str) -> Result<Vec<u32>, ImageError> {
    let mut words = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let token = line.split_whitespace().next().unwrap_or(line);
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let word = u32::from_str_radix(digits, 16).map_err(|source| ImageError::MalformedWord {
            line: index + 1,
            token: token.to_string(),
            source,
        })?;
        debug!("Loaded instruction: 0x{word:08x}");
        words.push(word);
    }
    Ok(words)
}
