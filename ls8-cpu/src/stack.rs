use crate::cpu::{CpuError, Ls8Cpu, Result, SP};

// The stack grows downward from 0xF4. SP is eight bits wide, so it is checked
// for wrapping instead of relying on memory bounds.
impl Ls8Cpu {
    /// `SP -= 1`, returning the new top-of-stack address.
    pub(crate) fn decrement_sp(&mut self) -> Result<usize> {
        let sp = self.regs.read(SP)?;
        if sp == 0 {
            return Err(CpuError::StackOverflow(self.pc));
        }
        self.regs.write(SP, sp - 1)?;
        Ok(sp as usize - 1)
    }

    /// `SP += 1`
    pub(crate) fn increment_sp(&mut self) -> Result<()> {
        let sp = self.regs.read(SP)?;
        if sp == u8::MAX {
            return Err(CpuError::StackUnderflow(self.pc));
        }
        self.regs.write(SP, sp + 1)?;
        Ok(())
    }

    /// Reads `memory[SP]` without moving SP.
    pub(crate) fn stack_top(&self) -> Result<u8> {
        let sp = self.regs.read(SP)?;
        if sp == u8::MAX {
            return Err(CpuError::StackUnderflow(self.pc));
        }
        Ok(self.ram.read_u8(sp as usize)?)
    }

    pub(crate) fn push_byte(&mut self, value: u8) -> Result<()> {
        let sp = self.decrement_sp()?;
        self.ram.write_u8(sp, value)?;
        Ok(())
    }

    pub(crate) fn pop_byte(&mut self) -> Result<u8> {
        let value = self.stack_top()?;
        self.increment_sp()?;
        Ok(value)
    }
}
