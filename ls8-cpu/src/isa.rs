use std::collections::HashMap;
use std::fmt;

use ls8_core::Opcode;

use crate::cpu::{Ls8Cpu, Result};
use crate::instructions;

pub const HLT: u8 = 0b0000_0001;
pub const LDI: u8 = 0b1000_0010;
pub const ST: u8 = 0b1000_0100;
pub const PRN: u8 = 0b0100_0111;
pub const MUL: u8 = 0b1010_0010;
pub const ADD: u8 = 0b1010_0000;
pub const POP: u8 = 0b0100_0110;
pub const PUSH: u8 = 0b0100_0101;
pub const CALL: u8 = 0b0101_0000;
pub const RET: u8 = 0b0001_0001;

pub type Handler = fn(&mut Ls8Cpu) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Instruction {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub operand_count: usize,
    pub sets_pc: bool,
    pub handler: Handler,
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{} ({:?})", self.mnemonic, self.opcode))
    }
}

impl Instruction {
    fn new(opcode: u8, mnemonic: &'static str, handler: Handler) -> Self {
        let opcode = Opcode::new(opcode);
        Self {
            opcode,
            mnemonic,
            operand_count: opcode.operand_count(),
            sets_pc: opcode.sets_pc(),
            handler,
        }
    }

    /// Total encoded length: the opcode byte plus its operand bytes.
    pub fn len_bytes(&self) -> usize {
        1 + self.operand_count
    }
}

/// Opcode to handler dispatch table. Built once, never mutated afterwards.
#[derive(Debug)]
pub struct InstructionTable {
    entries: HashMap<Opcode, Instruction>,
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionTable {
    pub fn new() -> Self {
        let instructions = [
            Instruction::new(HLT, "HLT", instructions::hlt),
            Instruction::new(LDI, "LDI", instructions::ldi),
            Instruction::new(ST, "ST", instructions::st),
            Instruction::new(PRN, "PRN", instructions::prn),
            Instruction::new(MUL, "MUL", instructions::mul),
            Instruction::new(ADD, "ADD", instructions::add),
            Instruction::new(POP, "POP", instructions::pop),
            Instruction::new(PUSH, "PUSH", instructions::push),
            Instruction::new(CALL, "CALL", instructions::call),
            Instruction::new(RET, "RET", instructions::ret),
        ];
        let table = Self {
            entries: instructions
                .into_iter()
                .map(|instruction| (instruction.opcode, instruction))
                .collect(),
        };
        tracing::debug!("built dispatch table with {} instructions", table.len());
        table
    }

    pub fn get(&self, opcode: Opcode) -> Option<&Instruction> {
        self.entries.get(&opcode)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
