//! Handling of unrecoverable faults.
//!
//! A fault freezes the system: interrupts are disabled, a distress glyph and a [`StatusCode`] are
//! shown on a [`FaultDisplay`], and the device either stays in that state until it is power
//! cycled, or resets itself after the glyph has been shown a given number of times (the panic
//! timeout). No fault ever returns to the code that raised it.
//!
//! The platform provides the display, a delay and the [`HardReset`]; [`FaultController`] ties them
//! together.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod controller;
mod glyph;
mod status;

pub use controller::{ConsoleDisplay, FaultController, FaultDisplay, FaultLatch, HardReset};
pub use glyph::{Glyph, DISTRESS_GLYPH, GLYPH_SIZE};
pub use status::StatusCode;

use portable_atomic::{AtomicU32, Ordering};

/// Panic timeout in effect until [`set_panic_timeout()`] is called.
///
/// Configurable through `CONFIG_PANIC_TIMEOUT`.
pub const DEFAULT_PANIC_TIMEOUT: u32 = bitcore_utils::u32_from_env_or!(
    "CONFIG_PANIC_TIMEOUT",
    0,
    "number of times a panic is shown before resetting, 0 for never"
);

/// Time the distress glyph stays on the display per iteration, in milliseconds.
///
/// Configurable through `CONFIG_PANIC_INTERVAL_MS`.
pub const PANIC_INTERVAL_MS: u32 = bitcore_utils::u32_from_env_or!(
    "CONFIG_PANIC_INTERVAL_MS",
    1000,
    "time a panic is shown per iteration, in milliseconds"
);

static PANIC_TIMEOUT: AtomicU32 = AtomicU32::new(DEFAULT_PANIC_TIMEOUT);

/// Sets how many times a later fault is shown before the device resets.
///
/// `0` keeps the device in the fault state until it is power cycled.
pub fn set_panic_timeout(iterations: u32) {
    PANIC_TIMEOUT.store(iterations, Ordering::Relaxed);
}

/// Returns the panic timeout set by [`set_panic_timeout()`].
pub fn panic_timeout() -> u32 {
    PANIC_TIMEOUT.load(Ordering::Relaxed)
}
