//! Diagnostic instruction classification.
//!
//! The harness never executes instructions; the classifier exists purely to
//! annotate the console trace. It recognizes a closed set of base-integer
//! major opcodes and reports the format plus the register indices visible in
//! the fixed field positions. Anything else classifies as unknown, which is
//! ordinary for data words read over the bus.

use std::fmt;

use super::instruction::InstructionBits;
use super::opcodes;

/// Format classification of one fetched word.
///
/// Register indices are raw field values; no register semantics are implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrClass {
    /// Register-immediate arithmetic.
    IType {
        /// Destination register index.
        rd: usize,
        /// First source register index.
        rs1: usize,
    },
    /// Register-register arithmetic.
    RType {
        /// Destination register index.
        rd: usize,
        /// First source register index.
        rs1: usize,
        /// Second source register index.
        rs2: usize,
    },
    /// Store.
    SType {
        /// Base address register index.
        rs1: usize,
        /// Source data register index.
        rs2: usize,
    },
    /// Conditional branch.
    BType {
        /// First comparand register index.
        rs1: usize,
        /// Second comparand register index.
        rs2: usize,
    },
    /// Load upper immediate.
    Lui {
        /// Destination register index.
        rd: usize,
    },
    /// Add upper immediate to PC.
    Auipc {
        /// Destination register index.
        rd: usize,
    },
    /// Jump and link.
    Jal {
        /// Link register index.
        rd: usize,
    },
    /// Jump and link register.
    Jalr {
        /// Link register index.
        rd: usize,
        /// Target base register index.
        rs1: usize,
    },
    /// Opcode outside the recognized set.
    Unknown {
        /// The unrecognized 7-bit opcode value.
        opcode: u32,
    },
}

impl fmt::Display for InstrClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IType { rd, rs1 } => write!(f, "I-type, rd=x{rd}, rs1=x{rs1}"),
            Self::RType { rd, rs1, rs2 } => {
                write!(f, "R-type, rd=x{rd}, rs1=x{rs1}, rs2=x{rs2}")
            }
            Self::SType { rs1, rs2 } => write!(f, "S-type, rs1=x{rs1}, rs2=x{rs2}"),
            Self::BType { rs1, rs2 } => write!(f, "B-type, rs1=x{rs1}, rs2=x{rs2}"),
            Self::Lui { rd } => write!(f, "LUI, rd=x{rd}"),
            Self::Auipc { rd } => write!(f, "AUIPC, rd=x{rd}"),
            Self::Jal { rd } => write!(f, "JAL, rd=x{rd}"),
            Self::Jalr { rd, rs1 } => write!(f, "JALR, rd=x{rd}, rs1=x{rs1}"),
            Self::Unknown { .. } => write!(f, "Unknown opcode"),
        }
    }
}

/// Classifies a 32-bit word by its major opcode.
///
/// Only the fields the format actually names are extracted; a word whose
/// opcode falls outside the recognized set returns [`InstrClass::Unknown`]
/// carrying the raw opcode.
pub fn classify(word: u32) -> InstrClass {
    match word.opcode() {
        opcodes::OP_IMM => InstrClass::IType {
            rd: word.rd(),
            rs1: word.rs1(),
        },
        opcodes::OP_REG => InstrClass::RType {
            rd: word.rd(),
            rs1: word.rs1(),
            rs2: word.rs2(),
        },
        opcodes::OP_STORE => InstrClass::SType {
            rs1: word.rs1(),
            rs2: word.rs2(),
        },
        opcodes::OP_BRANCH => InstrClass::BType {
            rs1: word.rs1(),
            rs2: word.rs2(),
        },
        opcodes::OP_LUI => InstrClass::Lui { rd: word.rd() },
        opcodes::OP_AUIPC => InstrClass::Auipc { rd: word.rd() },
        opcodes::OP_JAL => InstrClass::Jal { rd: word.rd() },
        opcodes::OP_JALR => InstrClass::Jalr {
            rd: word.rd(),
            rs1: word.rs1(),
        },
        opcode => InstrClass::Unknown { opcode },
    }
}
