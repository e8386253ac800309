//! Instruction field extraction.
//!
//! Provides bit extraction helpers for pulling RISC-V instruction fields
//! out of 32-bit encodings.

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting the destination register field (bits 7-11).
pub const RD_MASK: u32 = 0x1F;
/// Bit mask for extracting the first source register field (bits 15-19).
pub const RS1_MASK: u32 = 0x1F;
/// Bit mask for extracting the second source register field (bits 20-24).
pub const RS2_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Provides methods to extract the standard RISC-V instruction fields the
/// classifier reports from a 32-bit instruction encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    ///
    /// The opcode determines the instruction format and operation category.
    /// Returns the 7-bit opcode value.
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Returns the 5-bit register index (0-31) for the destination register.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    ///
    /// Returns the 5-bit register index (0-31) for the first source operand.
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    ///
    /// Returns the 5-bit register index (0-31) for the second source operand.
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    ///
    /// Used to distinguish between different operations within the same
    /// opcode. Returns the 3-bit funct3 value.
    fn funct3(&self) -> u32;
}

impl InstructionBits for u32 {
    /// Extracts the opcode field (bits 0-6) using bitwise AND with OPCODE_MASK.
    ///
    /// The opcode determines the instruction format and drives all subsequent
    /// field extraction.
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Shifts right by 7 bits to align the register field, then masks to
    /// extract the 5-bit register index.
    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    /// Extracts the first source register field (bits 15-19).
    ///
    /// Shifts right by 15 bits to align the register field, then masks to
    /// extract the 5-bit register index for the first source operand.
    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    /// Extracts the second source register field (bits 20-24).
    ///
    /// Shifts right by 20 bits to align the register field, then masks to
    /// extract the 5-bit register index for the second source operand.
    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    /// Extracts the funct3 field (bits 12-14).
    ///
    /// Shifts right by 12 bits and masks to extract the 3-bit function code.
    /// Used to distinguish between different operations within the same
    /// opcode (e.g., ADD vs SUB, BEQ vs BNE).
    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }
}
