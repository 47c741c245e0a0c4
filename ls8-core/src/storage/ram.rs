use std::cell::Cell;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemoryError {
    #[error("access of {1} byte(s) at 0x{0:04X} is out of bounds, memory size is 0x{2:04X}")]
    OutOfBounds(usize, usize, usize),
}

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Bounds-checked byte-addressable memory of `N` bytes.
///
/// Every access is checked against `[0, N)` and fails with
/// [`MemoryError::OutOfBounds`] at the point of the offending access.
#[derive(Clone, Debug)]
pub struct Ram<const N: usize> {
    buffer: [u8; N],
    bytes_written: usize,
    num_reads: Cell<usize>,
    num_writes: usize,
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self {
            buffer: [0; N],
            bytes_written: 0,
            num_reads: Cell::new(0),
            num_writes: 0,
        }
    }

    pub const fn size(&self) -> usize {
        N
    }

    fn check(address: usize, length: usize) -> Result<()> {
        match address.checked_add(length) {
            Some(end) if end <= N && (length > 0 || address < N) => Ok(()),
            _ => Err(MemoryError::OutOfBounds(address, length, N)),
        }
    }

    /// Reads one byte. Takes `&self`; the access counters are interior.
    pub fn read_u8(&self, address: usize) -> Result<u8> {
        Self::check(address, 1)?;
        self.num_reads.set(self.num_reads.get() + 1);
        Ok(self.buffer[address])
    }

    pub fn write(&mut self, address: usize, data: &[u8]) -> Result<()> {
        Self::check(address, data.len())?;
        tracing::trace!("write request: {} bytes at 0x{:X}", data.len(), address);
        self.bytes_written += data.len();
        self.num_writes += 1;
        self.buffer[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn write_u8(&mut self, address: usize, value: u8) -> Result<()> {
        self.write(address, &[value])
    }

    /// Reads without touching the access counters; clamps at the end of memory.
    pub fn peek(&self, address: usize, length: usize) -> &[u8] {
        let start = address.min(N);
        let end = address.saturating_add(length).min(N);
        &self.buffer[start..end]
    }

    pub fn num_reads(&self) -> usize {
        self.num_reads.get()
    }

    pub fn num_writes(&self) -> usize {
        self.num_writes
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{MemoryError, Ram};

    #[test]
    fn new_is_zeroed() {
        let ram = Ram::<256>::new();
        assert_eq!(ram.size(), 256);
        assert_eq!(ram.peek(0, 256), &[0u8; 256][..]);
    }

    #[test]
    fn write_then_read_random() {
        let mut ram = Ram::<256>::new();
        let mut buf = [0u8; 64];
        rand::thread_rng().fill(&mut buf);
        ram.write(0x80, &buf).unwrap();
        assert_eq!(ram.peek(0x80, 64), &buf[..]);
        assert_eq!(ram.read_u8(0x80).unwrap(), buf[0]);
        assert_eq!(ram.read_u8(0xBF).unwrap(), buf[63]);
    }

    #[test]
    fn last_byte_is_addressable() {
        let mut ram = Ram::<256>::new();
        ram.write_u8(0xFF, 0xAB).unwrap();
        assert_eq!(ram.read_u8(0xFF), Ok(0xAB));
    }

    #[test]
    fn out_of_bounds_fails() {
        let mut ram = Ram::<256>::new();
        assert_eq!(ram.read_u8(256), Err(MemoryError::OutOfBounds(256, 1, 256)));
        assert_eq!(
            ram.write_u8(0x100, 1),
            Err(MemoryError::OutOfBounds(0x100, 1, 256))
        );
        assert_eq!(
            ram.write(0xF0, &[0; 0x20]).unwrap_err(),
            MemoryError::OutOfBounds(0xF0, 0x20, 256)
        );
        assert!(ram.write(usize::MAX, &[1, 2]).is_err());
    }

    #[test]
    fn oversized_write_leaves_memory_untouched() {
        let mut ram = Ram::<4>::new();
        assert!(ram.write(0, &[1, 2, 3, 4, 5]).is_err());
        assert_eq!(ram.peek(0, 4), &[0, 0, 0, 0]);
        assert_eq!(ram.num_writes(), 0);
    }

    #[test]
    fn counters_track_accesses() {
        let mut ram = Ram::<16>::new();
        ram.write(0, &[1, 2, 3]).unwrap();
        ram.read_u8(0).unwrap();
        ram.read_u8(2).unwrap();
        assert_eq!(ram.num_writes(), 1);
        assert_eq!(ram.bytes_written(), 3);
        assert_eq!(ram.num_reads(), 2);
    }

    #[test]
    fn peek_clamps() {
        let mut ram = Ram::<4>::new();
        ram.write(2, &[7, 8]).unwrap();
        assert_eq!(ram.peek(2, 3), &[7, 8]);
        assert!(ram.peek(9, 3).is_empty());
    }
}
