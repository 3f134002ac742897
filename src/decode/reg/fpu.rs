//! FPU dispatch stub (spec.md §4.7, `0x680..0x6EF` and `0x78B..0x79F`):
//! this core has no floating-point unit, so every encoding in these
//! ranges is an invalid opcode.

use crate::fault::{Fault, FaultKind};

pub fn execute(_instr: crate::decode::instruction::Instruction) -> Result<(), Fault> {
    Err(Fault::new(FaultKind::InvalidOpcode))
}
