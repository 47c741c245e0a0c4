use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use ls8_core::Machine;
use ls8_cpu::{Ls8Cpu, Program};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Runs an LS-8 program until it halts.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Program listing: one binary literal per line, `#` starts a comment.
    program: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv per-instruction trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Fail if the program has not halted after this many instructions.
    #[arg(long)]
    max_cycles: Option<usize>,
}

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn execute(machine: &mut impl Machine, program: &Program, max_cycles: Option<usize>) -> Result<()> {
    machine.load(program.bytes())?;
    match max_cycles {
        Some(max_cycles) => machine.run_for(max_cycles)?,
        None => machine.run()?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(level_filter(args.verbose))
        .with(stderr_format)
        .init();

    tracing::info!("loading LS-8 program {}", args.program.display());
    let program = Program::from_file(&args.program)
        .with_context(|| format!("failed to load '{}'", args.program.display()))?;

    let mut cpu = Ls8Cpu::new();
    let result = execute(&mut cpu, &program, args.max_cycles);
    tracing::info!(
        "{} cycles, {} memory reads, {} memory writes",
        cpu.cycles(),
        cpu.memory().num_reads(),
        cpu.memory().num_writes()
    );
    result.with_context(|| format!("LS-8 stopped at PC 0x{:02X}", cpu.pc()))
}
