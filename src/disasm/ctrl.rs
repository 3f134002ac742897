//! CTRL-format disassembly (spec.md §4.9), mirroring
//! [`crate::decode::ctrl`]'s opcode partition: the unconditional
//! `b`/`call`/`ret`/`bal` quartet in the low two bits, then the
//! conditional `bcc`/`fault.cc` table keyed by the low three bits.

use super::DisasmSink;
use crate::decode::instruction::Instruction;

/// Condition-code mnemonic suffixes for the 3-bit CTRL/COBR field, in
/// the documented i960 order (spec.md GLOSSARY; [`crate::cond`]).
const CC_SUFFIX: [&str; 8] = ["no", "g", "e", "ge", "l", "ne", "le", "o"];

pub fn disassemble(instr: Instruction, addr: u32, sink: &mut impl DisasmSink) -> u32 {
    let top = instr.top_byte();
    let efa = addr.wrapping_add(instr.ctrl_displacement() as u32);

    let line = if top & 0x10 == 0 {
        match top & 0x3 {
            0 => format!("b {efa:#010x}"),
            1 => format!("call {efa:#010x}"),
            2 => "ret".to_string(),
            3 => format!("bal {efa:#010x}"),
            _ => unreachable!("2-bit field"),
        }
    } else {
        let cc = (top & 0x7) as usize;
        let mnemonic = if top & 0x08 != 0 { "fault" } else { "b" };
        format!("{mnemonic}.{} {efa:#010x}", CC_SUFFIX[cc])
    };

    sink.emit(&line);
    4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::LineBuffer;

    #[test]
    fn unconditional_branch_renders_absolute_target() {
        let mut sink = LineBuffer::default();
        disassemble(Instruction(0x0800_0100), 0x1000, &mut sink);
        assert_eq!(sink.lines, vec!["b 0x00001100"]);
    }

    #[test]
    fn ret_takes_no_operand() {
        let mut sink = LineBuffer::default();
        disassemble(Instruction(0x0A00_0000), 0x4100, &mut sink);
        assert_eq!(sink.lines, vec!["ret"]);
    }

    #[test]
    fn conditional_branch_names_the_condition_suffix() {
        let mut sink = LineBuffer::default();
        // top 0x12: conditional group, cc = 2 (equal)
        disassemble(Instruction(0x1200_0040), 0x2000, &mut sink);
        assert_eq!(sink.lines, vec!["b.e 0x00002040"]);
    }

    #[test]
    fn fault_cc_gets_the_fault_mnemonic() {
        let mut sink = LineBuffer::default();
        // top 0x1C: fault group, cc = 4 (less)
        disassemble(Instruction(0x1C00_0000), 0x3000, &mut sink);
        assert_eq!(sink.lines, vec!["fault.l 0x00003000"]);
    }
}
