//! Global Harness Constants.
//!
//! This module defines system-wide constants used across the harness. It includes:
//! 1. **Memory Constants:** Word store sizing and the filler encoding.
//! 2. **Bus Constants:** Byte-lane geometry for the write mask.
//! 3. **Fallback Program:** The image substituted when no program file is found.

/// Filler word used to pad the instruction store and answer out-of-range
/// reads. This is the RISC-V `NOP` encoding (`ADDI x0, x0, 0`).
pub const FILLER_WORD: u32 = 0x0000_0013;

/// Minimum size of the instruction word store, in 32-bit words.
///
/// Images shorter than this are padded with [`FILLER_WORD`] so the core can
/// fetch past the end of a short program without leaving mapped memory.
pub const MIN_STORE_WORDS: usize = 1024;

/// Number of byte lanes in a 32-bit bus word.
pub const BYTE_LANES: u32 = 4;

/// Size of one bus word in bytes; byte addresses shift right by
/// [`WORD_SHIFT`] to produce word indices.
pub const WORD_BYTES: u32 = 4;

/// Shift converting a byte address into a word index.
pub const WORD_SHIFT: u32 = 2;

/// Program substituted when the image file cannot be opened, so the harness
/// stays runnable without any external file.
///
/// The sequence is `nop; addi x2, x0, 5; addi x3, x0, 3; add x1, x2, x3`.
pub const FALLBACK_PROGRAM: [u32; 4] = [0x0000_0013, 0x0050_0113, 0x0030_0193, 0x0031_00b3];
