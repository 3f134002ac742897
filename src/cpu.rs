//! Top-level processor: ties [`ProcessorState`], the format decoders,
//! and a host-supplied [`Memory`]/[`SystemHooks`] pair into one
//! fetch-decode-execute step.
//!
//! Grounded in the teacher's `Cpu` struct and
//! `execute_next_instruction` (`core/cpu/mod.rs`): same
//! fetch-decode-dispatch-advance shape, stripped of the teacher's
//! i-cache/write-queue/DMA cycle bookkeeping (out of scope — spec.md's
//! Non-goals exclude cycle-accurate timing) but keeping its discipline
//! of logging every exception at the point it's raised.

use tracing::warn;

use crate::config::CoreConfig;
use crate::decode::instruction::{Format, Instruction};
use crate::decode::reg::SystemHooks;
use crate::decode::{cobr, ctrl, mem_fmt, reg};
use crate::fault::Fault;
use crate::memory::Memory;
use crate::registers::ProcessorState;

pub struct Processor {
    pub state: ProcessorState,
}

impl Processor {
    pub fn new(config: &CoreConfig) -> Self {
        let mut state = ProcessorState::new();
        state.ip = config.initial_ip;
        if config.initial_supervisor {
            state.pc = crate::bits::setbit(state.pc, crate::registers::PC_EXECUTION_MODE_BIT);
        }
        if config.initial_overflow_mask {
            state.ac = crate::bits::setbit(state.ac, crate::fault::AC_OVERFLOW_MASK_BIT);
        }
        Processor { state }
    }

    /// Fetches, decodes, and executes the instruction at `ip`, advancing
    /// `ip` past it (format dispatch and branch/call/ret logic decide
    /// exactly how far). Returns the fault, if any, after notifying
    /// `hooks` — the host decides whether a returned fault is fatal.
    pub fn execute_next<M: Memory, H: SystemHooks>(
        &mut self,
        mem: &mut M,
        hooks: &mut H,
    ) -> Result<(), Fault> {
        let pre_ip = self.state.ip;
        let word = mem.read::<32>(pre_ip);
        let instr = Instruction(word);

        let result = self.dispatch(instr, word, pre_ip, mem, hooks);
        if let Err(fault) = result {
            warn!(code = format!("{:#010x}", fault.to_code()), "instruction fault");
            hooks.fault(fault.to_code());
        }
        result
    }

    fn dispatch<M: Memory, H: SystemHooks>(
        &mut self,
        instr: Instruction,
        word: u32,
        pre_ip: u32,
        mem: &mut M,
        hooks: &mut H,
    ) -> Result<(), Fault> {
        let cpu = &mut self.state;
        let format = match Format::from_opcode(word) {
            Some(f) => f,
            None => {
                return Err(Fault::new(crate::fault::FaultKind::InvalidOpcode));
            }
        };

        // Tentative fall-through address; branch/call/ret/bal overwrite
        // it via `branch::b` before this function returns.
        cpu.ip = pre_ip.wrapping_add(4);

        match format {
            Format::Ctrl => ctrl::execute(instr, cpu, mem, pre_ip),
            Format::Cobr => {
                let efa = pre_ip.wrapping_add(instr.cobr_displacement() as u32);
                cobr::execute(instr, cpu, efa)
            }
            Format::Reg => reg::execute(instr, cpu, mem, hooks),
            Format::Mem => {
                // mem_fmt::execute sets cpu.ip to the correct post-fetch
                // address itself (accounting for a MEMB second word)
                // before any indirect branch reads it as a link address.
                let fetch_addr = pre_ip.wrapping_add(4);
                mem_fmt::execute(instr, cpu, mem, pre_ip, fetch_addr)?;
                Ok(())
            }
        }
    }
}
