//! Multiply/divide sub-family (spec.md §4.7): `0x670 emul`, `0x671
//! ediv`, `0x701 mulo`, `0x708 remo`, `0x70B divo`, `0x741 muli`,
//! `0x748 remi`, `0x749 modi`, `0x74B divi`.

use super::operand::{dest_of, read_a, read_b};
use crate::fault::{Fault, FaultKind};
use crate::registers::ProcessorState;

pub fn execute(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
) -> Result<(), Fault> {
    let op = instr.reg_opcode();
    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);
    let dst = dest_of(instr);

    match op {
        0x670 => {
            // emul: 64-bit unsigned product of a, b into (dst, dst|1).
            let product = (a as u64) * (b as u64);
            cpu.r[dst] = product as u32;
            cpu.r[dst | 1] = (product >> 32) as u32;
            Ok(())
        }
        0x671 => {
            // ediv: 64-bit (r[src|1]:b) divided by a; quotient into
            // dst|1, remainder into dst. src2 register holds the
            // low half of the dividend per the srcdst-pair convention.
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            let src = instr.reg_src2();
            let low = cpu.r[src] as u64;
            let high = cpu.r[src | 1] as u64;
            let dividend = (high << 32) | low;
            let divisor = a as u64;
            cpu.r[dst] = (dividend % divisor) as u32;
            cpu.r[dst | 1] = (dividend / divisor) as u32;
            Ok(())
        }
        0x701 => {
            // mulo: unsigned multiply, low 32 bits, no overflow fault.
            cpu.r[dst] = (a as u64).wrapping_mul(b as u64) as u32;
            Ok(())
        }
        0x741 => {
            // muli: signed multiply, faults if the result doesn't fit.
            let product = (a as i32 as i64) * (b as i32 as i64);
            let truncated = product as i32 as i64;
            if truncated != product {
                return Err(Fault::new(FaultKind::IntegerOverflow));
            }
            cpu.r[dst] = product as u32;
            Ok(())
        }
        0x708 => {
            // remo: unsigned remainder of b (dividend) by a (divisor).
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            cpu.r[dst] = b % a;
            Ok(())
        }
        0x70B => {
            // divo: unsigned quotient of b (dividend) by a (divisor).
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            cpu.r[dst] = b / a;
            Ok(())
        }
        0x748 => {
            // remi: signed, C-style (truncating) remainder, b rem a.
            let (a, b) = (a as i32, b as i32);
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            if b == i32::MIN && a == -1 {
                return Err(Fault::new(FaultKind::IntegerOverflow));
            }
            cpu.r[dst] = (b % a) as u32;
            Ok(())
        }
        0x749 => {
            // modi: Euclidean-leaning remainder of b by a, adjusted
            // toward the divisor's sign when the operands disagree.
            let (a, b) = (a as i32, b as i32);
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            if b == i32::MIN && a == -1 {
                return Err(Fault::new(FaultKind::IntegerOverflow));
            }
            let r = b % a;
            let adjusted = if r != 0 && (r < 0) != (a < 0) {
                r + a
            } else {
                r
            };
            cpu.r[dst] = adjusted as u32;
            Ok(())
        }
        0x74B => {
            // divi: signed quotient of b by a, faults on overflow or
            // division by zero.
            let (a, b) = (a as i32, b as i32);
            if a == 0 {
                return Err(Fault::new(FaultKind::DivisionByZero));
            }
            if b == i32::MIN && a == -1 {
                return Err(Fault::new(FaultKind::IntegerOverflow));
            }
            cpu.r[dst] = (b / a) as u32;
            Ok(())
        }
        _ => Err(Fault::new(FaultKind::InvalidOpcode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::instruction::Instruction;

    fn reg_at(op: u32, src1: u32, src2: u32, dst: u32) -> Instruction {
        let top = (op >> 4) & 0xFF;
        let minor = op & 0xF;
        let mut word = (top << 24) | (minor << 7);
        word |= (src1 & 0x1F) << 19;
        word |= (src2 & 0x1F) << 14;
        word |= dst & 0x1F;
        Instruction(word)
    }

    #[test]
    fn emul_produces_a_64_bit_product() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 0xFFFF_FFFF;
        cpu.r[4] = 2;
        let instr = reg_at(0x670, 3, 4, 6);
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 0xFFFF_FFFE);
        assert_eq!(cpu.r[7], 1);
    }

    #[test]
    fn ediv_splits_quotient_and_remainder() {
        let mut cpu = ProcessorState::new();
        cpu.r[4] = 7; // low half of dividend, register `src2`
        cpu.r[5] = 0; // high half (src2 | 1)
        cpu.r[3] = 2; // divisor
        let instr = reg_at(0x671, 3, 4, 6);
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 1); // remainder
        assert_eq!(cpu.r[7], 3); // quotient
    }

    #[test]
    fn ediv_by_zero_faults() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 0;
        let instr = reg_at(0x671, 3, 4, 6);
        let err = execute(instr, &mut cpu).unwrap_err();
        assert_eq!(err.kind, FaultKind::DivisionByZero);
    }

    #[test]
    fn muli_overflow_faults() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 0x7FFF_FFFF;
        cpu.r[4] = 2;
        let instr = reg_at(0x741, 3, 4, 6);
        let err = execute(instr, &mut cpu).unwrap_err();
        assert_eq!(err.kind, FaultKind::IntegerOverflow);
    }

    #[test]
    fn muli_in_range_succeeds() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = (-3i32) as u32;
        cpu.r[4] = 4;
        let instr = reg_at(0x741, 3, 4, 6);
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6] as i32, -12);
    }

    #[test]
    fn divi_min_by_neg_one_faults() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = (-1i32) as u32; // a: divisor
        cpu.r[4] = i32::MIN as u32; // b: dividend
        let instr = reg_at(0x74B, 3, 4, 6);
        let err = execute(instr, &mut cpu).unwrap_err();
        assert_eq!(err.kind, FaultKind::IntegerOverflow);
    }

    #[test]
    fn remi_follows_c_style_truncation() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 2; // a: divisor
        cpu.r[4] = (-7i32) as u32; // b: dividend
        let instr = reg_at(0x748, 3, 4, 6);
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6] as i32, -1);
    }

    #[test]
    fn modi_adjusts_toward_euclidean_result() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 2; // a: divisor
        cpu.r[4] = (-7i32) as u32; // b: dividend
        let instr = reg_at(0x749, 3, 4, 6);
        execute(instr, &mut cpu).unwrap();
        // -7 % 2 == -1 (C-style); signs disagree and r != 0, so +2 -> 1
        assert_eq!(cpu.r[6] as i32, 1);
    }

    #[test]
    fn divo_and_remo_are_unsigned() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 7;
        cpu.r[4] = 0xFFFF_FFFF;
        let q = reg_at(0x70B, 3, 4, 6);
        execute(q, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 613_566_756);

        let r = reg_at(0x708, 3, 4, 6);
        execute(r, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 3);
    }
}
