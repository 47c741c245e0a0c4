use std::fmt;

/// A single-byte opcode laid out as `AABCDDDD`:
///
/// * `AA`: number of operand bytes following the opcode
/// * `B`: set for ALU operations
/// * `C`: set for instructions that assign PC themselves
/// * `DDDD`: instruction identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opcode {
    value: u8,
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0x{:02X}", self.value))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0b{:08b}", self.value))
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl Opcode {
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    pub const fn operand_count(&self) -> usize {
        (self.value >> 6) as usize
    }

    pub const fn sets_pc(&self) -> bool {
        self.value & 0b0001_0000 != 0
    }
}
