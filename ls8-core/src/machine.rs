use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Running,
    Halted,
}

/// Cooperative termination flag shared between a machine and its host.
///
/// The run loop checks the flag before every fetch and unwinds with an error
/// once it is set. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

pub trait Machine {
    type Error: Error + Send + Sync + 'static;

    /// Installs `program` at address 0 without resetting registers or PC.
    fn load(&mut self, program: &[u8]) -> Result<(), Self::Error>;

    /// Executes a single instruction.
    fn step(&mut self) -> Result<RunState, Self::Error>;

    /// Executes until the machine halts.
    fn run(&mut self) -> Result<(), Self::Error>;

    /// Executes until the machine halts or `max_cycles` instructions have run.
    fn run_for(&mut self, max_cycles: usize) -> Result<(), Self::Error>;

    fn state(&self) -> RunState;

    fn stop_handle(&self) -> StopHandle;
}
