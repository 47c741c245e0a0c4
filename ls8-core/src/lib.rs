pub mod cpu;
mod machine;
mod register;
mod storage;

pub use crate::cpu::opcode::Opcode;
pub use crate::machine::{Machine, RunState, StopHandle};
pub use crate::register::{RegisterError, RegisterFile};
pub use crate::storage::{MemoryError, Ram};
