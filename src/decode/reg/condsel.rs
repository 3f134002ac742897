//! Conditional add/sub/select sub-family (spec.md §4.7,
//! `0x780..0x7F4`): add/sub/select gated by the encoded condition,
//! select writes `b` on true else `a`.
//!
//! Opcode layout (self-consistent, no public i960 encoding pins down
//! this family beyond the named operations): top byte selects the
//! operation (`0x78` select, `0x79` add, `0x7A` sub), the low three
//! bits of the minor nibble carry the three-valued condition the same
//! way COBR's `testcc` range does.

use super::operand::{dest_of, read_a, read_b};
use crate::arith::{add, sub};
use crate::cond::check_cond;
use crate::fault::{Fault, FaultKind};
use crate::registers::ProcessorState;

pub fn execute(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
) -> Result<(), Fault> {
    let op = instr.reg_opcode();
    let top = op >> 4;
    let cc = op & 0x7;
    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);
    let taken = check_cond(cc, cpu.cc());

    let result = match top {
        0x78 => {
            if taken {
                b
            } else {
                a
            }
        }
        0x79 => {
            if taken {
                let (r, _) = add(b, a);
                r
            } else {
                a
            }
        }
        0x7A => {
            if taken {
                let (r, _) = sub(b, a);
                r
            } else {
                a
            }
        }
        _ => return Err(Fault::new(FaultKind::InvalidOpcode)),
    };
    cpu.r[dest_of(instr)] = result;
    Ok(())
}
