use crate::cpu::{Ls8Cpu, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
}

impl AluOp {
    /// Results wrap modulo 256; overflow is never an error.
    pub fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Mul => a.wrapping_mul(b),
        }
    }
}

impl Ls8Cpu {
    /// `reg[reg_a] = reg[reg_a] OP reg[reg_b]`
    pub(crate) fn alu(&mut self, op: AluOp, reg_a: usize, reg_b: usize) -> Result<()> {
        let a = self.read_register(reg_a)?;
        let b = self.read_register(reg_b)?;
        let result = op.apply(a, b);
        tracing::trace!("{:?} R{} R{}: {} -> {}", op, reg_a, reg_b, a, result);
        self.write_register(reg_a, result)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::AluOp;

    #[test]
    fn add_wraps() {
        assert_eq!(AluOp::Add.apply(8, 9), 17);
        assert_eq!(AluOp::Add.apply(255, 2), 1);
        assert_eq!(AluOp::Add.apply(200, 100), 44);
    }

    #[test]
    fn mul_wraps() {
        assert_eq!(AluOp::Mul.apply(8, 9), 72);
        assert_eq!(AluOp::Mul.apply(16, 16), 0);
        assert_eq!(AluOp::Mul.apply(255, 255), 1);
    }

    #[test]
    fn matches_modular_arithmetic() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a: u8 = rng.gen();
            let b: u8 = rng.gen();
            assert_eq!(AluOp::Add.apply(a, b) as u32, (a as u32 + b as u32) % 256);
            assert_eq!(AluOp::Mul.apply(a, b) as u32, (a as u32 * b as u32) % 256);
        }
    }
}
