//! System sub-family (spec.md §4.7, `0x660..0x66F`): `calls` dispatch
//! to the external supervisor-call table; `mark`/`fmark`/`flushreg`/
//! `syncf` no-ops (spec.md §9 Open Question (c)).

use super::operand::read_a;
use crate::fault::{Fault, FaultKind};
use crate::registers::ProcessorState;

/// External collaborator the core defers supervisor-call dispatch and
/// fault reporting to (spec.md §6: "a `calls(vector)` procedure that
/// implements the architectural supervisor call dispatch" and "an
/// externally defined fault reporter `fault(type)`").
pub trait SystemHooks {
    fn calls(&mut self, vector: u32);

    /// Notified with the packed fault code (spec.md §4.3) whenever an
    /// instruction execution returns an error. Default is a no-op for
    /// hosts that only care about the `Result` the core already returns.
    fn fault(&mut self, _code: u32) {}
}

pub fn execute<H: SystemHooks>(
    instr: crate::decode::instruction::Instruction,
    cpu: &mut ProcessorState,
    hooks: &mut H,
) -> Result<(), Fault> {
    match instr.reg_opcode() {
        0x660 => {
            hooks.calls(read_a(instr, cpu));
            Ok(())
        }
        0x661 | 0x662 | 0x663 | 0x664 => Ok(()), // mark, fmark, flushreg, syncf
        _ => Err(Fault::new(FaultKind::InvalidOpcode)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::instruction::Instruction;

    fn reg_at(op: u32, src1: u32) -> Instruction {
        let top = (op >> 4) & 0xFF;
        let minor = op & 0xF;
        Instruction((top << 24) | (minor << 7) | ((src1 & 0x1F) << 19))
    }

    struct RecordingHooks {
        last_vector: Option<u32>,
    }

    impl SystemHooks for RecordingHooks {
        fn calls(&mut self, vector: u32) {
            self.last_vector = Some(vector);
        }
    }

    #[test]
    fn calls_dispatches_the_vector_in_a() {
        let mut cpu = ProcessorState::new();
        cpu.r[3] = 7;
        let mut hooks = RecordingHooks { last_vector: None };
        execute(reg_at(0x660, 3), &mut cpu, &mut hooks).unwrap();
        assert_eq!(hooks.last_vector, Some(7));
    }

    #[test]
    fn flushreg_and_friends_are_no_ops() {
        let mut cpu = ProcessorState::new();
        let mut hooks = RecordingHooks { last_vector: None };
        for op in [0x661, 0x662, 0x663, 0x664] {
            execute(reg_at(op, 0), &mut cpu, &mut hooks).unwrap();
        }
        assert_eq!(hooks.last_vector, None);
    }

    #[test]
    fn unknown_minor_faults() {
        let mut cpu = ProcessorState::new();
        let mut hooks = RecordingHooks { last_vector: None };
        let err = execute(reg_at(0x66F, 0), &mut cpu, &mut hooks).unwrap_err();
        assert_eq!(err.kind, FaultKind::InvalidOpcode);
    }
}
