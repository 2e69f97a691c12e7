use parking_lot::Once;

mod event_tracer;
pub use event_tracer::{Event, EventTracer};

mod comps;
pub use comps::*;

/// Installs `env_logger` once per process.
pub fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}
