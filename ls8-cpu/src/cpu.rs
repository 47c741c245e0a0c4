use std::fmt;
use std::io::{self, Write};

use ls8_core::{
    Machine, MemoryError, Opcode, Ram, RegisterError, RegisterFile, RunState, StopHandle,
};
use thiserror::Error;

use crate::isa::InstructionTable;

pub const MEMORY_SIZE: usize = 256;
pub const NUM_REGISTERS: usize = 8;

/// Register 7 doubles as the stack pointer.
pub const SP: usize = 7;
pub const INITIAL_SP: u8 = 0xF4;

#[derive(Debug, Error)]
pub enum CpuError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error("illegal opcode {0} at 0x{1:02X}")]
    IllegalOpcode(Opcode, usize),
    #[error("stack overflow at 0x{0:02X}")]
    StackOverflow(usize),
    #[error("stack underflow at 0x{0:02X}")]
    StackUnderflow(usize),
    #[error("execution stopped after {0} cycles")]
    Stopped(usize),
    #[error("cycle budget of {0} exhausted before halt")]
    CycleBudgetExhausted(usize),
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CpuError>;

pub type Ls8Ram = Ram<MEMORY_SIZE>;
pub type Ls8Registers = RegisterFile<NUM_REGISTERS>;

/// The LS-8: 256 bytes of memory, eight 8-bit registers and a program counter.
pub struct Ls8Cpu {
    pub(crate) regs: Ls8Registers,
    pub(crate) ram: Ls8Ram,
    pub(crate) pc: usize,
    pub(crate) state: RunState,
    pub(crate) output: Box<dyn Write>,
    table: InstructionTable,
    stop: StopHandle,
    cycles: usize,
}

impl fmt::Debug for Ls8Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ls8Cpu")
            .field("pc", &format_args!("0x{:02X}", self.pc))
            .field("regs", &self.regs)
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .finish()
    }
}

impl Default for Ls8Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8Cpu {
    /// Creates a CPU whose PRN output goes to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    pub fn with_output(output: Box<dyn Write>) -> Self {
        let mut regs = [0; NUM_REGISTERS];
        regs[SP] = INITIAL_SP;
        Self {
            regs: Ls8Registers::from_values(regs),
            ram: Ls8Ram::new(),
            pc: 0,
            state: RunState::Running,
            output,
            table: InstructionTable::new(),
            stop: StopHandle::new(),
            cycles: 0,
        }
    }

    pub fn read_memory(&self, address: usize) -> Result<u8> {
        Ok(self.ram.read_u8(address)?)
    }

    pub fn write_memory(&mut self, address: usize, value: u8) -> Result<()> {
        Ok(self.ram.write_u8(address, value)?)
    }

    pub fn read_register(&self, index: usize) -> Result<u8> {
        Ok(self.regs.read(index)?)
    }

    pub fn write_register(&mut self, index: usize, value: u8) -> Result<()> {
        Ok(self.regs.write(index, value)?)
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn memory(&self) -> &Ls8Ram {
        &self.ram
    }

    pub(crate) fn operand(&self, offset: usize) -> Result<u8> {
        self.read_memory(self.pc + offset)
    }

    /// Renders `TRACE: PC | op a b | r0 .. r7` in hex.
    pub fn trace(&self) -> String {
        let mut line = format!("TRACE: {:02X} |", self.pc);
        for offset in 0..3 {
            match self.ram.peek(self.pc + offset, 1).first() {
                Some(byte) => line.push_str(&format!(" {:02X}", byte)),
                None => line.push_str(" --"),
            }
        }
        line.push_str(" |");
        for value in self.regs.values() {
            line.push_str(&format!(" {:02X}", value));
        }
        line
    }

    fn run_until(&mut self, budget: Option<usize>) -> Result<()> {
        tracing::info!("running LS-8 from PC 0x{:02X}", self.pc);
        let result = self.execute(budget);
        // PRN output written before a failure still reaches the sink.
        let flushed = self.output.flush();
        result?;
        flushed?;
        tracing::info!("halted after {} cycles", self.cycles);
        Ok(())
    }

    fn execute(&mut self, budget: Option<usize>) -> Result<()> {
        let start = self.cycles;
        while self.state == RunState::Running {
            if self.stop.is_stopped() {
                tracing::warn!("stop requested after {} cycles", self.cycles);
                return Err(CpuError::Stopped(self.cycles));
            }
            if let Some(max_cycles) = budget {
                if self.cycles - start >= max_cycles {
                    return Err(CpuError::CycleBudgetExhausted(max_cycles));
                }
            }
            self.step()?;
        }
        Ok(())
    }
}

impl Machine for Ls8Cpu {
    type Error = CpuError;

    fn load(&mut self, program: &[u8]) -> Result<()> {
        tracing::info!("loading {} byte program at 0x00", program.len());
        self.ram.write(0, program)?;
        Ok(())
    }

    fn step(&mut self) -> Result<RunState> {
        if self.state == RunState::Halted {
            return Ok(RunState::Halted);
        }

        let opcode = Opcode::from(self.read_memory(self.pc)?);
        let instruction = *self
            .table
            .get(opcode)
            .ok_or(CpuError::IllegalOpcode(opcode, self.pc))?;
        tracing::trace!("{} | {}", self.trace(), instruction.mnemonic);

        (instruction.handler)(self)?;
        self.cycles += 1;

        if !instruction.sets_pc {
            self.pc += instruction.len_bytes();
        }
        Ok(self.state)
    }

    fn run(&mut self) -> Result<()> {
        self.run_until(None)
    }

    fn run_for(&mut self, max_cycles: usize) -> Result<()> {
        self.run_until(Some(max_cycles))
    }

    fn state(&self) -> RunState {
        self.state
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}
