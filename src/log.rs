//! Structured logging for the core, following the teacher's reloadable
//! `tracing_subscriber` setup.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Owns a reload handle so a host can raise or lower verbosity at runtime
/// without tearing down the subscriber.
pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    pub fn new(initial_level: &str) -> Self {
        let filter = EnvFilter::new(initial_level);
        let (filter_layer, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer())
            .init();

        Self { reload_handle }
    }

    pub fn set_log_level(&self, level: &str) {
        self.reload_handle
            .modify(|f| *f = EnvFilter::new(level))
            .unwrap();
    }
}

/// Convenience entry point for hosts that don't need to change verbosity
/// at runtime.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::new("info"))
        .with(fmt::layer())
        .init();
}
