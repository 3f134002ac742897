//! REG-format disassembly (spec.md §4.9), mirroring
//! [`crate::decode::reg`]'s per-sub-family opcode partition. Each arm
//! renders exactly the operands its decoder counterpart reads — most
//! follow the `a, b, c` (src1, src2, dst) order, a handful (`scanbit`,
//! `calls`, the no-operand system ops) are narrower.

use super::{fpu_register_name, operand_text, register_name, DisasmSink};
use crate::decode::instruction::Instruction;

const CC_SUFFIX: [&str; 8] = ["no", "g", "e", "ge", "l", "ne", "le", "o"];

const LOGIC_NAMES: [&str; 16] = [
    "notbit", "and", "andnot", "setbit", "notand", "notand", "xor", "or", "nor", "xnor", "not",
    "ornot", "clrbit", "notor", "nand", "alterbit",
];

fn a(instr: Instruction) -> String {
    operand_text(instr.reg_m1(), instr.reg_src1(), false)
}

fn b(instr: Instruction) -> String {
    operand_text(instr.reg_m2(), instr.reg_src2(), false)
}

fn c(instr: Instruction) -> String {
    register_name(instr.reg_srcdst())
}

fn abc(name: &str, instr: Instruction) -> String {
    format!("{name} {}, {}, {}", a(instr), b(instr), c(instr))
}

pub fn disassemble(instr: Instruction, sink: &mut impl DisasmSink) -> u32 {
    let op = instr.reg_opcode();

    let line = match op {
        0x580..=0x58F => abc(LOGIC_NAMES[(op & 0xF) as usize], instr),

        0x590..=0x593 => {
            let name = match op {
                0x590 => "addo",
                0x591 => "addi",
                0x592 => "subo",
                0x593 => "subi",
                _ => unreachable!(),
            };
            abc(name, instr)
        }
        0x5B0 => abc("addc", instr),
        0x5B2 => abc("subc", instr),

        0x594..=0x597 => {
            let name = match op {
                0x594 => "cmpob",
                0x595 => "cmpib",
                0x596 => "cmpos",
                0x597 => "cmpis",
                _ => unreachable!(),
            };
            format!("{name} {}, {}", a(instr), b(instr))
        }

        0x598 => format!("shro {}, {}, {}", a(instr), b(instr), c(instr)),
        0x599 => format!("shrdi {}, {}, {}", a(instr), b(instr), c(instr)),
        0x59A | 0x59B => format!("shri {}, {}, {}", a(instr), b(instr), c(instr)),
        0x59C => format!("shlo {}, {}, {}", a(instr), b(instr), c(instr)),
        0x59D => format!("rotate {}, {}, {}", a(instr), b(instr), c(instr)),
        0x59E | 0x59F => format!("shli {}, {}, {}", a(instr), b(instr), c(instr)),

        0x5A0..=0x5A7 => {
            let name = match op & 0x7 {
                0 => "cmpo",
                1 => "cmpi",
                2 => "concmpo",
                3 => "concmpi",
                4 => "cmpinco",
                5 => "cmpinci",
                6 => "cmpdeco",
                7 => "cmpdeci",
                _ => unreachable!("3-bit field"),
            };
            let minor = op & 0x7;
            if minor & 0x4 != 0 {
                format!("{name} {}, {}, {}", a(instr), b(instr), c(instr))
            } else {
                format!("{name} {}, {}", a(instr), b(instr))
            }
        }

        0x5AC => format!("scanbyte {}, {}", a(instr), b(instr)),
        0x5AD => format!("bswap {}, {}", b(instr), c(instr)),
        0x5AE => format!("chkbit {}, {}", a(instr), b(instr)),

        0x5B4 => "intdis".to_string(),
        0x5B5 => "inten".to_string(),

        0x5CC | 0x5DC | 0x5EC | 0x5FC => {
            let name = match op {
                0x5CC => "mov",
                0x5DC => "movl",
                0x5EC => "movt",
                0x5FC => "movq",
                _ => unreachable!(),
            };
            format!("{name} {}, {}", register_name(instr.reg_src1()), c(instr))
        }

        0x5D8 => format!(
            "eshro {}, {}, {}",
            a(instr),
            register_name(instr.reg_src2()),
            c(instr)
        ),

        0x610 => abc("atmod", instr),
        0x612 => abc("atadd", instr),

        0x640 => format!("spanbit {}, {}", b(instr), c(instr)),
        0x641 => format!("scanbit {}, {}", b(instr), c(instr)),
        0x645 => abc("modac", instr),
        0x654 => abc("modtc", instr),
        0x655 => abc("modpc", instr),
        0x650 => abc("modify", instr),
        0x651 => abc("extract", instr),

        0x660 => format!("calls {}", a(instr)),
        0x661 => "mark".to_string(),
        0x662 => "fmark".to_string(),
        0x663 => "flushreg".to_string(),
        0x664 => "syncf".to_string(),

        0x670 => abc("emul", instr),
        0x671 => format!(
            "ediv {}, {}, {}",
            a(instr),
            register_name(instr.reg_src2()),
            c(instr)
        ),
        0x701 => abc("mulo", instr),
        0x708 => abc("remo", instr),
        0x70B => abc("divo", instr),
        0x741 => abc("muli", instr),
        0x748 => abc("remi", instr),
        0x749 => abc("modi", instr),
        0x74B => abc("divi", instr),

        0x680..=0x6EF | 0x78B..=0x79F => {
            sink.emit(&format!(
                ".word {:#010x} ; fpu {}",
                instr.word(),
                fpu_register_name(instr.reg_srcdst())
            ));
            return 4;
        }

        0x780..=0x7F4 => {
            let top = op >> 4;
            let cc = (op & 0x7) as usize;
            let name = match top {
                0x78 => "select",
                0x79 => "condadd",
                0x7A => "condsub",
                _ => {
                    sink.emit(&format!(".word {:#010x}", instr.word()));
                    return 4;
                }
            };
            format!("{name}.{} {}, {}, {}", CC_SUFFIX[cc], a(instr), b(instr), c(instr))
        }

        _ => {
            sink.emit(&format!(".word {:#010x}", instr.word()));
            return 4;
        }
    };

    sink.emit(&line);
    4
}
