//! Compare family (spec.md §4.7, `0x5A0..0x5A7`): plain `cmpo`/`cmpi`,
//! the `concmpo`/`concmpi` range-check refinement, and the post-
//! increment/decrement variants that additionally write the
//! pre-mutation value of `b` into `c`.

use super::operand::{read_a, read_b};
use crate::cond::{cmp, concmp};
use crate::fault::Fault;
use crate::registers::ProcessorState;

pub fn execute(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
) -> Result<(), Fault> {
    let op = instr.reg_opcode();
    let minor = op & 0x7;
    let signed = minor & 0x1 != 0; // F0
    let f1 = minor & 0x2 != 0;
    let f2 = minor & 0x4 != 0;

    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);

    let new_cc = if f1 && !f2 {
        concmp(cpu.cc(), a, b, signed)
    } else {
        cmp(a, b, signed)
    };
    cpu.set_cc(new_cc);

    if f2 {
        let step: u32 = if f1 { 1u32.wrapping_neg() } else { 1 }; // F1 selects dec vs inc
        cpu.r[super::operand::dest_of(instr)] = b;
        let idx = instr.reg_src2();
        cpu.r[idx] = b.wrapping_add(step);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::CC_GREATER;
    use crate::decode::instruction::Instruction;

    fn reg_at(op: u32, src1: u32, src2: u32, dst: u32) -> Instruction {
        let mut word = (0x5Au32 << 24) | ((op & 0xF) << 7);
        word |= (src1 & 0x1F) << 19;
        word |= (src2 & 0x1F) << 14;
        word |= dst & 0x1F;
        Instruction(word)
    }

    #[test]
    fn cmpo_sets_cc_from_unsigned_order() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 7;
        cpu.r[4] = 5;
        let instr = reg_at(0, 3, 4, 6); // cmpo
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.cc(), CC_GREATER);
    }

    #[test]
    fn post_increment_writes_old_value_and_bumps_source() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 5;
        cpu.r[4] = 10;
        let instr = reg_at(4, 3, 4, 6); // F2=1, F1=0 -> increment
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 10);
        assert_eq!(cpu.r[4], 11);
    }

    #[test]
    fn post_decrement_writes_old_value_and_drops_source() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 5;
        cpu.r[4] = 10;
        let instr = reg_at(6, 3, 4, 6); // F2=1, F1=1 -> decrement
        execute(instr, &mut cpu).unwrap();
        assert_eq!(cpu.r[6], 10);
        assert_eq!(cpu.r[4], 9);
    }
}
