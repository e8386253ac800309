//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode table, field extraction utilities, and the diagnostic
//! classifier used to annotate fetched words in the console trace. The
//! classifier covers the base-integer formats only; the harness itself never
//! interprets instruction semantics.

/// Diagnostic format classification for fetched words.
pub mod classify;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Major opcode values for the base integer instruction set.
pub mod opcodes;

pub use classify::{classify, InstrClass};
pub use instruction::InstructionBits;
