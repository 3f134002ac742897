//! MEM-format disassembly (spec.md §4.9), mirroring
//! [`crate::decode::mem_fmt`]'s addressing-mode table. The effective
//! address is rendered as a `(disp, base, index*scale)` expression
//! rather than resolved to a number, since the point of disassembly is
//! the encoding, not the runtime value.

use super::{format_disp, register_name, DisasmSink};
use crate::decode::instruction::Instruction;
use crate::memory::Memory;

/// Mirrors [`crate::decode::mem_fmt`]'s private mode table: bit 3 = a
/// 32-bit displacement word follows, bit 2 = use displacement, bit 1 =
/// use base register, bit 0 = use index register.
const MODE_FLAGS: [u8; 16] = [4, 4, 4, 4, 2, 8, 0, 3, 6, 6, 6, 6, 0xC, 0xE, 0xD, 0xF];

/// Renders the addressing-mode operand and reports whether a second
/// instruction word was consumed.
fn operand_expr<M: Memory>(instr: Instruction, mem: &mut M, fetch_addr: u32) -> (String, bool) {
    let mode = instr.mem_mode();

    if mode == 7 {
        let disp = mem.read::<32>(fetch_addr) as i32;
        return (format!("ip{}", format_disp(disp)), true);
    }
    if mode == 6 {
        return ("<reserved mode 6>".to_string(), false);
    }

    let flags = MODE_FLAGS[mode as usize];
    let has_extra = flags & 0x8 != 0;
    let use_base = flags & 0x2 != 0;
    let use_index = flags & 0x1 != 0;

    let (disp, consumed) = if has_extra {
        (mem.read::<32>(fetch_addr) as i32, true)
    } else if flags & 0x4 != 0 {
        (instr.mem_disp12() as i32, false)
    } else {
        (0, false)
    };

    let mut parts = Vec::new();
    if disp != 0 || (!use_base && !use_index) {
        parts.push(format!("{disp:#x}"));
    }
    if use_base {
        parts.push(register_name(instr.mem_base()));
    }
    if use_index {
        let scale = 1u32 << instr.mem_scale_exp();
        parts.push(format!("{}*{scale}", register_name(instr.mem_index())));
    }

    (parts.join(", "), consumed)
}

pub fn disassemble<M: Memory>(instr: Instruction, addr: u32, mem: &mut M, sink: &mut impl DisasmSink) -> u32 {
    let top = instr.top_byte();
    let srcdst = register_name(instr.mem_srcdst());
    let fetch_addr = addr.wrapping_add(4);
    let (expr, consumed) = operand_expr(instr, mem, fetch_addr);
    let bytes = if consumed { 8 } else { 4 };

    let line = match top {
        0x82 => format!("bx ({expr})"),
        0x83 => format!("balx ({expr}), {srcdst}"),
        0x84 => format!("callx ({expr})"),
        0xC8 => format!("lda {expr}, {srcdst}"),
        0x80 => format!("ldob ({expr}), {srcdst}"),
        0xC0 => format!("ldib ({expr}), {srcdst}"),
        0x85 => format!("ldos ({expr}), {srcdst}"),
        0xC2 => format!("ldis ({expr}), {srcdst}"),
        0x88 => format!("ld ({expr}), {srcdst}"),
        0x8C => format!("ldl ({expr}), {srcdst}"),
        0x90 => format!("ldt ({expr}), {srcdst}"),
        0x98 => format!("ldq ({expr}), {srcdst}"),
        0x81 => format!("stob {srcdst}, ({expr})"),
        0xC1 => format!("stib {srcdst}, ({expr})"),
        0x86 => format!("stos {srcdst}, ({expr})"),
        0xC3 => format!("stis {srcdst}, ({expr})"),
        0x89 => format!("st {srcdst}, ({expr})"),
        0x8D => format!("stl {srcdst}, ({expr})"),
        0x91 => format!("stt {srcdst}, ({expr})"),
        0x99 => format!("stq {srcdst}, ({expr})"),
        _ => {
            sink.emit(&format!(".word {:#010x}", instr.word()));
            return 4;
        }
    };

    sink.emit(&line);
    bytes
}
