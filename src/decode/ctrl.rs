//! CTRL format decode + execute (spec.md §4.5).
//!
//! Grounded in the teacher's `op_j`/`op_jal`/`op_beq` family in
//! `cpu/mod.rs`: one opcode byte selects between an unconditional jump
//! and a table of conditional branches sharing the same displacement
//! field.

use super::instruction::Instruction;
use crate::branch;
use crate::cond::check_cond;
use crate::fault::{Fault, FaultKind};
use crate::memory::Memory;
use crate::registers::{ProcessorState, LP};

/// Executes a CTRL-format instruction. `efa` is the branch target
/// (`pre_ip + displacement`); `pre_ip` is the address of this
/// instruction itself.
pub fn execute<M: Memory>(
    instr: Instruction,
    cpu: &mut ProcessorState,
    mem: &mut M,
    pre_ip: u32,
) -> Result<(), Fault> {
    let efa = pre_ip.wrapping_add(instr.ctrl_displacement() as u32);
    let top = instr.top_byte();

    if top & 0x10 == 0 {
        match top & 0x3 {
            0 => branch::b(cpu, efa),
            1 => branch::call(cpu, mem, efa),
            2 => branch::ret(cpu, mem)?,
            3 => branch::bal(cpu, efa, LP),
            _ => unreachable!(),
        }
        return Ok(());
    }

    let cc = top & 0x7;
    let is_fault = top & 0x08 != 0;
    let taken = check_cond(cc as u32, cpu.cc());

    if is_fault {
        if taken {
            return Err(Fault::new(FaultKind::ConstraintRange));
        }
        return Ok(());
    }

    if taken {
        branch::b(cpu, efa);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;

    #[test]
    fn unconditional_b_branches() {
        let mut cpu = ProcessorState::new();
        let mut mem = FlatMemory::new(0x10);
        // top byte 0x08 (b), displacement +0x100
        let instr = Instruction(0x0800_0100);
        execute(instr, &mut cpu, &mut mem, 0x1000).unwrap();
        assert_eq!(cpu.ip, 0x1100);
    }

    #[test]
    fn bcc_branches_only_when_condition_matches() {
        let mut cpu = ProcessorState::new();
        let mut mem = FlatMemory::new(0x10);
        cpu.set_cc(crate::cond::CC_EQUAL);
        // top byte 0x12 (bcc cc=2=equal), displacement +0x40
        let instr = Instruction(0x1200_0040);
        execute(instr, &mut cpu, &mut mem, 0x2000).unwrap();
        assert_eq!(cpu.ip, 0x2040);

        cpu.set_cc(crate::cond::CC_GREATER);
        cpu.ip = 0;
        execute(instr, &mut cpu, &mut mem, 0x2000).unwrap();
        assert_eq!(cpu.ip, 0); // not taken, ip untouched
    }

    #[test]
    fn fault_cc_raises_constraint_range_when_taken() {
        let mut cpu = ProcessorState::new();
        let mut mem = FlatMemory::new(0x10);
        cpu.set_cc(crate::cond::CC_LESS);
        // top byte 0x1C (fault.cc cc=4=less)
        let instr = Instruction(0x1C00_0000);
        let err = execute(instr, &mut cpu, &mut mem, 0x3000).unwrap_err();
        assert_eq!(err.kind, FaultKind::ConstraintRange);
    }

    #[test]
    fn call_then_ret_round_trips_through_ctrl_dispatch() {
        let mut cpu = ProcessorState::new();
        let mut mem = FlatMemory::new(0x2000);
        cpu.r[1] = 0x1040; // SP
        cpu.r[31] = 0x1000; // FP
        cpu.ip = 0x4004;
        // top byte 0x09 (call), displacement +0x100
        let call_instr = Instruction(0x0900_0100);
        execute(call_instr, &mut cpu, &mut mem, 0x4000).unwrap();
        assert_eq!(cpu.ip, 0x4100);
        assert_eq!(cpu.r[0], 0x1000); // PFP

        cpu.ip = 0x4200;
        // top byte 0x0A (ret)
        let ret_instr = Instruction(0x0A00_0000);
        execute(ret_instr, &mut cpu, &mut mem, 0x4100).unwrap();
        assert_eq!(cpu.ip, 0x4004);
        assert_eq!(cpu.r[31], 0x1000);
    }
}
