pub mod cpu;
pub mod isa;
pub mod program;

mod alu;
mod instructions;
mod stack;

pub use crate::cpu::{CpuError, Ls8Cpu};
pub use crate::program::{Program, ProgramError};
