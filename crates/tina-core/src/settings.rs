//! Runtime settings for the bridge.
//!
//! Settings are thread-local like the middleware registry, and are read when
//! a definition is built. Changing them afterwards does not affect
//! definitions that already exist.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Level used by the `logger` builtin for lifecycle events.
    pub lifecycle_log_level: log::Level,
    /// Whether `Pipeline::for_flavor` includes the flavor's builtin chain.
    pub builtins_enabled: bool,
}

impl Settings {
    pub const fn new() -> Self {
        Self {
            lifecycle_log_level: log::Level::Debug,
            builtins_enabled: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static SETTINGS: Cell<Settings> = const { Cell::new(Settings::new()) };
}

pub fn current() -> Settings {
    SETTINGS.with(Cell::get)
}

pub fn configure(f: impl FnOnce(&mut Settings)) {
    SETTINGS.with(|slot| {
        let mut settings = slot.get();
        f(&mut settings);
        slot.set(settings);
    });
}
