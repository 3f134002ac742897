//! Shift sub-family (spec.md §4.7, `0x598..0x59F`; Design Notes "Shift
//! semantics").
//!
//! Grounded in the teacher's `op_shift::<LEFT, ARITHMETIC, BY_SHAMT>`
//! const-generic dispatch (`cpu/mod.rs`), generalized from MIPS's
//! fixed 5-bit shift-amount field to the i960's full-register count
//! (with its own saturation/zero rules per direction) and the rounded
//! variant `shrdi` MIPS has no counterpart for.

use super::operand::{dest_of, read_a, read_b};
use crate::fault::{overflow_policy, Fault};
use crate::registers::ProcessorState;

pub fn execute(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
) -> Result<(), Fault> {
    let op = instr.reg_opcode();
    let a = read_a(instr, cpu);
    let b = read_b(instr, cpu);

    let result = match op {
        0x598 => shro(a, b),
        0x599 => shrdi(a, b),
        0x59A | 0x59B => shri(a, b), // 0x59B is a filler row, behaves as its neighbor
        0x59C => shlo(a, b),
        0x59D => rotate(a, b),
        0x59E | 0x59F => {
            let (r, overflowed) = shli(a, b);
            overflow_policy(&mut cpu.ac, overflowed)?;
            r
        }
        _ => return Err(Fault::new(crate::fault::FaultKind::InvalidOpcode)),
    };

    cpu.r[dest_of(instr)] = result;
    Ok(())
}

/// Unsigned (ordinal) right shift: 0 for counts of 32 or more.
fn shro(count: u32, value: u32) -> u32 {
    if count >= 32 { 0 } else { value >> count }
}

/// Signed arithmetic right shift, saturating the count at 31.
fn shri(count: u32, value: u32) -> u32 {
    let n = count.min(31);
    ((value as i32) >> n) as u32
}

/// `shri` rounded toward zero: add 1 when the discarded bits were
/// non-zero and the pre-shift value was negative.
fn shrdi(count: u32, value: u32) -> u32 {
    let n = count.min(31);
    let r = shri(count, value);
    let negative = (value as i32) < 0;
    let discarded_nonzero = n > 0 && (r << n) != value;
    if negative && discarded_nonzero { r.wrapping_add(1) } else { r }
}

/// Unsigned (ordinal) left shift: 0 for counts of 32 or more.
fn shlo(count: u32, value: u32) -> u32 {
    if count >= 32 { 0 } else { value << count }
}

/// Rotate right by `-a mod 32` (spec.md §4.7), expressed as the
/// equivalent double-shift-and-or.
fn rotate(a: u32, b: u32) -> u32 {
    let left = a & 31;
    let right = a.wrapping_neg() & 31;
    (b << left) | (b >> right)
}

/// Logical left shift with overflow detection: overflow iff shifting
/// the result back by the same count (arithmetically) fails to recover
/// the original value, i.e. a bit that mattered to the sign was lost.
fn shli(count: u32, value: u32) -> (u32, bool) {
    if count >= 32 {
        return (0, value != 0);
    }
    if count == 0 {
        return (value, false);
    }
    let r = value << count;
    let restored = (r as i32) >> count;
    (r, restored != value as i32)
}
