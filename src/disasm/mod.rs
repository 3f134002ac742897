//! Disassembler (spec.md §4.9): one mnemonic line per instruction,
//! written to an abstract textual sink, returning the bytes consumed
//! (4, or 8 for a MEMB second word).
//!
//! Grounded in the teacher's `disassemble(pc, instruction) ->
//! Disassembled` (`core/cpu/disassembler.rs`): same
//! opcode-table-into-`parameters`-string shape and `register_alias`
//! helper, generalized from MIPS's single flat register file to the
//! i960's named local/global split and from a `Disassembled` struct
//! return value to a push-based sink (spec.md §6: "writes to an
//! abstract textual output sink").

mod cobr;
mod ctrl;
mod mem;
mod reg;

use crate::decode::instruction::{Format, Instruction};
use crate::memory::Memory;

/// Per-mnemonic operand-class flags (spec.md §4.9).
pub const USES_A: u8 = 0x1;
pub const USES_B: u8 = 0x2;
pub const USES_C: u8 = 0x4;
pub const FPU_NAMESPACE: u8 = 0x8;

/// Receives one formatted disassembly line per instruction. Kept
/// minimal and push-based so a host can route it to a terminal, a log
/// file, or an in-memory listing without this module caring which.
pub trait DisasmSink {
    fn emit(&mut self, line: &str);
}

/// A sink that collects every emitted line, for tests and for hosts
/// that want the whole listing at once.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pub lines: Vec<String>,
}

impl DisasmSink for LineBuffer {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Names a register per spec.md §4.9: `pfp, sp, rip, r3..r15,
/// g0..g13, g14, fp`.
pub fn register_name(index: usize) -> String {
    match index {
        0 => "pfp".to_string(),
        1 => "sp".to_string(),
        2 => "rip".to_string(),
        3..=15 => format!("r{index}"),
        16..=29 => format!("g{}", index - 16),
        30 => "g14".to_string(),
        31 => "fp".to_string(),
        _ => format!("r{index}"),
    }
}

/// Names an FPU register: `fp0..fp15` are the hardware registers,
/// `fp16` and `fp22` are the literal constants `0.0` and `1.0`
/// (spec.md §4.9).
pub fn fpu_register_name(index: usize) -> String {
    match index {
        16 => "fp16".to_string(), // literal 0.0
        22 => "fp22".to_string(), // literal 1.0
        _ => format!("fp{index}"),
    }
}

/// Formats an `a`/`b` REG operand: a register name, or the bare
/// literal `0..31` when the corresponding mode bit selects literal
/// mode.
pub fn operand_text(is_literal: bool, value: usize, fpu: bool) -> String {
    if is_literal {
        value.to_string()
    } else if fpu {
        fpu_register_name(value)
    } else {
        register_name(value)
    }
}

/// Renders a signed byte displacement as `+0x..`/`-0x..` (spec.md §4.9
/// scenario forms, e.g. `cmpibl r3, r4, +0x40`).
pub(crate) fn format_disp(disp: i32) -> String {
    if disp < 0 {
        format!("-{:#x}", -disp)
    } else {
        format!("+{disp:#x}")
    }
}

fn word_fallback(sink: &mut impl DisasmSink, word: u32) -> u32 {
    sink.emit(&format!(".word {word:#010x}"));
    4
}

/// Disassembles the instruction at `addr`, writing one line to `sink`.
/// Returns the number of bytes consumed: 4, or 8 for REG/MEM encodings
/// with a trailing displacement or literal word.
pub fn disassemble<M: Memory>(addr: u32, mem: &mut M, sink: &mut impl DisasmSink) -> u32 {
    let word = mem.read::<32>(addr);
    let instr = Instruction(word);

    match Format::from_opcode(word) {
        Some(Format::Ctrl) => ctrl::disassemble(instr, addr, sink),
        Some(Format::Cobr) => cobr::disassemble(instr, addr, sink),
        Some(Format::Reg) => reg::disassemble(instr, sink),
        Some(Format::Mem) => mem::disassemble(instr, addr, mem, sink),
        None => word_fallback(sink, word),
    }
}
