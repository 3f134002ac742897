//! Bitwise/bit-op sub-family (spec.md §4.7, `0x58x`).
//!
//! The four-bit minor field selects one of sixteen rows. Grounded in
//! the teacher's `op_and`/`op_or`/`op_xor`/`op_nor` cluster
//! (`cpu/mod.rs`), generalized to the full sixteen-row table and the
//! three single-bit forms (`setbit`/`clrbit`/`notbit`) the i960 folds
//! into the same opcode family.

use super::operand::{dest_of, read_a, read_b};
use crate::bits::bit_mask;
use crate::fault::Fault;
use crate::registers::ProcessorState;

pub fn execute(instr: crate::decode::instruction::Instruction, cpu: &mut ProcessorState) -> Result<(), Fault> {
    let f = instr.reg_opcode() & 0xF;
    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);
    let mask = bit_mask(a & 31);

    let result = match f {
        0 => b ^ mask,         // notbit
        1 => a & b,            // and
        2 => a & !b,           // andnot
        3 => b | mask,         // setbit
        4 | 5 => !a & b,       // notand (5 is a filler row, behaves as its neighbor)
        6 => a ^ b,            // xor
        7 => a | b,            // or
        8 => !(a | b),         // nor
        9 => !(a ^ b),         // xnor
        10 => !b,              // not
        11 => a | !b,          // ornot
        12 => b & !mask,       // clrbit
        13 => !a | b,          // notor
        14 => !(a & b),        // nand
        15 => {
            // alterbit: set or clear bit `a` of `b` per AC bit 1.
            if cpu.ac & 0x2 != 0 { b | mask } else { b & !mask }
        }
        _ => unreachable!("4-bit field"),
    };

    cpu.r[dest_of(instr)] = result;
    Ok(())
}
