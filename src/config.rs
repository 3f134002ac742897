//! Host-facing runtime configuration (SPEC_FULL.md §A.3): the handful
//! of knobs a host embedding this core sets before running it.
//!
//! Grounded in the teacher's `core::config::Config` (`core/config/mod.rs`):
//! same plain, `Default`-able settings struct, generalized from the
//! teacher's host-I/O concerns (key bindings) down to this core's only
//! configurable surface — initial processor state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoreConfig {
    /// Value loaded into `ip` before the first fetch.
    pub initial_ip: u32,
    /// Whether the processor starts in supervisor mode (PC bit 1).
    pub initial_supervisor: bool,
    /// Whether the AC overflow mask is set at startup (integer overflow
    /// sets a flag instead of faulting).
    pub initial_overflow_mask: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            initial_ip: 0,
            initial_supervisor: false,
            initial_overflow_mask: false,
        }
    }
}
