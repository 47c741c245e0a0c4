use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {0}: '{1}' is not an 8-bit binary literal")]
    InvalidLiteral(usize, String),
}

pub type Result<T> = std::result::Result<T, ProgramError>;

/// An LS-8 program image, ready to be loaded at address 0.
///
/// The text format holds one binary literal per line. Everything after a `#`
/// is a comment and blank lines are skipped, so an annotated listing such as
///
/// ```text
/// 10000010 # LDI R0,8
/// 00000000
/// 00001000
/// ```
///
/// parses to `[0x82, 0x00, 0x08]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl FromStr for Program {
    type Err = ProgramError;

    fn from_str(source: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let code = line.split('#').next().unwrap_or_default();
            let Some(literal) = code.split_whitespace().next() else {
                continue;
            };
            let byte = u8::from_str_radix(literal, 2)
                .map_err(|_| ProgramError::InvalidLiteral(idx + 1, String::from(literal)))?;
            bytes.push(byte);
        }
        Ok(Self { bytes })
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl Program {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("reading program from {}", path.display());
        let source = fs::read_to_string(path)?;
        source.parse()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use ls8_core::Machine;

    use super::*;
    use crate::isa::{ADD, HLT, LDI, PRN};
    use crate::Ls8Cpu;

    const PRINT8: &str = "\
# print8.ls8: Print the number 8 on the screen

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";

    #[test]
    fn parses_annotated_listing() {
        let program: Program = PRINT8.parse().unwrap();
        assert_eq!(
            program.bytes(),
            &[LDI, 0, 8, PRN, 0, HLT]
        );
        assert_eq!(program.len(), 6);
    }

    #[test]
    fn empty_source_is_empty_program() {
        let program: Program = "\n# nothing here\n   \n".parse().unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn tolerates_whitespace_and_crlf() {
        let program: Program = "  10100000  \r\n\t00000001#HLT\r\n".parse().unwrap();
        assert_eq!(program.bytes(), &[ADD, HLT]);
    }

    #[test]
    fn rejects_invalid_literals() {
        let err = "00000001\n10000012\n".parse::<Program>().unwrap_err();
        match err {
            ProgramError::InvalidLiteral(line, literal) => {
                assert_eq!(line, 2);
                assert_eq!(literal, "10000012");
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(matches!(
            "100000000".parse::<Program>(),
            Err(ProgramError::InvalidLiteral(1, _))
        ));
    }

    fn run_listing(source: &str) -> Ls8Cpu {
        let program: Program = source.parse().unwrap();
        let mut cpu = Ls8Cpu::with_output(Box::new(io::sink()));
        cpu.load(program.bytes()).unwrap();
        cpu.run().unwrap();
        cpu
    }

    #[test]
    fn demo_listings_run() {
        let cpu = run_listing(include_str!("../../demos/print8.ls8"));
        assert_eq!(cpu.read_register(0).unwrap(), 8);

        let cpu = run_listing(include_str!("../../demos/mult.ls8"));
        assert_eq!(cpu.read_register(0).unwrap(), 72);

        let cpu = run_listing(include_str!("../../demos/stack.ls8"));
        assert_eq!(cpu.read_register(0).unwrap(), 2);
        assert_eq!(cpu.read_register(1).unwrap(), 1);

        let cpu = run_listing(include_str!("../../demos/call.ls8"));
        assert_eq!(cpu.read_register(0).unwrap(), 8);
        assert_eq!(cpu.read_register(7).unwrap(), 0xF4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("ls8-missing-program.ls8");
        assert!(matches!(
            Program::from_file(path),
            Err(ProgramError::Io(_))
        ));
    }

    #[test]
    fn file_program_runs() {
        let path = std::env::temp_dir().join(format!("ls8-print8-{}.ls8", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(PRINT8.as_bytes()).unwrap();
        drop(file);

        let program = Program::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let mut cpu = Ls8Cpu::with_output(Box::new(io::sink()));
        cpu.load(program.bytes()).unwrap();
        cpu.run().unwrap();
        assert_eq!(cpu.read_register(0).unwrap(), 8);
        assert_eq!(cpu.cycles(), 3);
    }
}
