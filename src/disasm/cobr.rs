//! COBR-format disassembly (spec.md §4.9), mirroring
//! [`crate::decode::cobr`]'s three sub-families: `testcc` (no
//! branch), the `bbc`/`bbs` single-bit test, and `cmpobcc`/`cmpibcc`.

use super::{format_disp, operand_text, DisasmSink};
use crate::decode::instruction::Instruction;

const CC_SUFFIX: [&str; 8] = ["no", "g", "e", "ge", "l", "ne", "le", "o"];

pub fn disassemble(instr: Instruction, _addr: u32, sink: &mut impl DisasmSink) -> u32 {
    let top = instr.top_byte();
    let a = operand_text(instr.cobr_m1(), instr.cobr_src1(), false);
    let b_name = super::register_name(instr.cobr_src2());
    let disp = format_disp(instr.cobr_displacement());

    let line = match top {
        0x20..=0x27 => {
            let cc = (top & 0x7) as usize;
            format!("test.{} {b_name}", CC_SUFFIX[cc])
        }
        0x30..=0x3F => {
            let group_cc = top & 0x7;
            let signed = top & 0x08 != 0;
            match group_cc {
                0 => format!("bbc {a}, {b_name}, {disp}"),
                7 => format!("bbs {a}, {b_name}, {disp}"),
                cc => {
                    let family = if signed { "cmpib" } else { "cmpob" };
                    format!("{family}{} {a}, {b_name}, {disp}", CC_SUFFIX[cc as usize])
                }
            }
        }
        _ => {
            sink.emit(&format!(".word {:#010x}", instr.word()));
            return 4;
        }
    };

    sink.emit(&line);
    4
}
