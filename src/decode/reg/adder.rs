//! Adder sub-family (spec.md §4.7, `0x590..0x593` plain, `0x5B0`/`0x5B2`
//! with carry).
//!
//! Grounded in the teacher's `op_arithmetic::<ADD, CHECK_OVERFLOW,
//! IMMEDIATE>` const-generic dispatch (`cpu/mod.rs`): one function
//! covers add/sub and the ordinal/integer (checked/unchecked) split via
//! a boolean parameter instead of a fresh function per variant.

use super::operand::{dest_of, read_a, read_b};
use crate::arith::{adc, add, overflow_add, overflow_sub, sbb, sub};
use crate::fault::{overflow_policy, Fault, FaultKind};
use crate::registers::ProcessorState;

pub fn execute(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
) -> Result<(), Fault> {
    let op = instr.reg_opcode();
    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);

    match op {
        0x590..=0x593 => {
            // `addi a, b, c` / `subi a, b, c` compute b +/- a.
            let is_sub = op & 0b10 != 0;
            let checked = op & 0b01 != 0;
            let (r, overflowed) = if is_sub {
                let (r, _) = sub(b, a);
                (r, overflow_sub(b, a, r))
            } else {
                let (r, _) = add(b, a);
                (r, overflow_add(b, a, r))
            };
            if checked {
                overflow_policy(&mut cpu.ac, overflowed)?;
            }
            cpu.r[dest_of(instr)] = r;
            Ok(())
        }
        0x5B0 | 0x5B2 => {
            let carry_in = cpu.ac & 0x2 != 0;
            let (r, carry_out, overflowed) = if op == 0x5B0 {
                let (r, co) = adc(b, a, carry_in);
                (r, co, overflow_add(b, a, r))
            } else {
                let (r, bo) = sbb(b, a, carry_in);
                (r, bo, overflow_sub(b, a, r))
            };
            let cc = ((carry_out as u32) << 1) | (overflowed as u32);
            cpu.set_cc(cc);
            cpu.r[dest_of(instr)] = r;
            Ok(())
        }
        _ => Err(Fault::new(FaultKind::InvalidOpcode)),
    }
}
