//! Shared REG-format operand fetch (spec.md §4.7): `a`/`b` are each a
//! register or a 5-bit literal per their mode bit; `c` is always a
//! register.

use crate::decode::instruction::Instruction;
use crate::registers::ProcessorState;

#[inline]
pub fn read_a(instr: Instruction, cpu: &ProcessorState) -> u32 {
    if instr.reg_m1() {
        instr.reg_src1() as u32
    } else {
        cpu.r[instr.reg_src1()]
    }
}

#[inline]
pub fn read_b(instr: Instruction, cpu: &ProcessorState) -> u32 {
    if instr.reg_m2() {
        instr.reg_src2() as u32
    } else {
        cpu.r[instr.reg_src2()]
    }
}

#[inline]
pub fn dest_of(instr: Instruction) -> usize {
    instr.reg_srcdst()
}
