use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterError {
    #[error("register index {0} out of bounds, must be [0, {1})")]
    InvalidRegister(usize, usize),
}

pub type Result<T> = std::result::Result<T, RegisterError>;

/// An 8-bit register.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Reg8 {
    value: u8,
}

impl Reg8 {
    fn read(&self) -> u8 {
        self.value
    }

    fn write(&mut self, value: u8) {
        self.value = value;
    }
}

impl fmt::Debug for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0x{:02X}", self.value))
    }
}

/// A fixed set of `N` general-purpose 8-bit registers, indexed `[0, N)`.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterFile<const N: usize> {
    regs: [Reg8; N],
}

impl<const N: usize> Default for RegisterFile<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for RegisterFile<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.regs.iter()).finish()
    }
}

impl<const N: usize> RegisterFile<N> {
    pub fn new() -> Self {
        Self {
            regs: [Reg8::default(); N],
        }
    }

    pub fn from_values(values: [u8; N]) -> Self {
        Self {
            regs: values.map(|value| Reg8 { value }),
        }
    }

    fn get(&self, index: usize) -> Result<&Reg8> {
        self.regs
            .get(index)
            .ok_or(RegisterError::InvalidRegister(index, N))
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Reg8> {
        self.regs
            .get_mut(index)
            .ok_or(RegisterError::InvalidRegister(index, N))
    }

    pub fn read(&self, index: usize) -> Result<u8> {
        Ok(self.get(index)?.read())
    }

    pub fn write(&mut self, index: usize, value: u8) -> Result<()> {
        self.get_mut(index)?.write(value);
        Ok(())
    }

    pub fn values(&self) -> [u8; N] {
        self.regs.map(|reg| reg.read())
    }
}
