//! Opcode handlers.
//!
//! Handlers read their operands from memory at `PC+1` and `PC+2`. Apart from
//! CALL and RET they leave PC alone; the run loop advances it past the
//! instruction afterwards.

use std::io::Write;

use ls8_core::{MemoryError, RunState};

use crate::alu::AluOp;
use crate::cpu::{Ls8Cpu, Result};

pub(crate) fn hlt(cpu: &mut Ls8Cpu) -> Result<()> {
    cpu.state = RunState::Halted;
    Ok(())
}

pub(crate) fn ldi(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg = cpu.operand(1)? as usize;
    let value = cpu.operand(2)?;
    cpu.write_register(reg, value)
}

pub(crate) fn st(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg_a = cpu.operand(1)? as usize;
    let reg_b = cpu.operand(2)? as usize;
    let address = cpu.read_register(reg_a)?;
    let value = cpu.read_register(reg_b)?;
    cpu.write_memory(address as usize, value)
}

pub(crate) fn prn(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg = cpu.operand(1)? as usize;
    let value = cpu.read_register(reg)?;
    writeln!(cpu.output, "{}", value)?;
    Ok(())
}

pub(crate) fn mul(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg_a = cpu.operand(1)? as usize;
    let reg_b = cpu.operand(2)? as usize;
    cpu.alu(AluOp::Mul, reg_a, reg_b)
}

pub(crate) fn add(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg_a = cpu.operand(1)? as usize;
    let reg_b = cpu.operand(2)? as usize;
    cpu.alu(AluOp::Add, reg_a, reg_b)
}

pub(crate) fn push(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg = cpu.operand(1)? as usize;
    cpu.read_register(reg)?;
    // SP moves first, so PUSH R7 stores the decremented SP.
    let sp = cpu.decrement_sp()?;
    let value = cpu.read_register(reg)?;
    cpu.write_memory(sp, value)
}

pub(crate) fn pop(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg = cpu.operand(1)? as usize;
    cpu.read_register(reg)?;
    // The register is written before SP moves, so POP R7 ends at memory[SP] + 1.
    let value = cpu.stack_top()?;
    cpu.write_register(reg, value)?;
    cpu.increment_sp()
}

pub(crate) fn call(cpu: &mut Ls8Cpu) -> Result<()> {
    let reg = cpu.operand(1)? as usize;
    let target = cpu.read_register(reg)?;
    let return_address = cpu.pc + 2;
    let return_address = u8::try_from(return_address)
        .map_err(|_| MemoryError::OutOfBounds(return_address, 1, cpu.ram.size()))?;
    cpu.push_byte(return_address)?;
    tracing::trace!("CALL 0x{:02X}, return to 0x{:02X}", target, return_address);
    cpu.pc = target as usize;
    Ok(())
}

pub(crate) fn ret(cpu: &mut Ls8Cpu) -> Result<()> {
    let return_address = cpu.pop_byte()?;
    tracing::trace!("RET to 0x{:02X}", return_address);
    cpu.pc = return_address as usize;
    Ok(())
}
