//! Entering the fault state.
//!
//! See [`bitcore_fault`] for the behavior of the fault state.

use bitcore_fault::{ConsoleDisplay, FaultController, FaultLatch};

use crate::arch::{delay::Delay, reset::Reset};

#[doc(inline)]
pub use bitcore_fault::{
    panic_timeout, set_panic_timeout, StatusCode, DEFAULT_PANIC_TIMEOUT, PANIC_INTERVAL_MS,
};

static LATCH: FaultLatch = FaultLatch::new();

/// Disables interrupts, shows the distress glyph with `status_code`, and never returns.
///
/// Status codes `1..=255` are shown after the glyph; `0` shows the glyph only. Whether and when
/// the device resets is decided by the [panic timeout](set_panic_timeout).
///
/// ```no_run
/// bitcore::fault::set_panic_timeout(4);
/// bitcore::panic(20);
/// ```
pub fn panic(status_code: u8) -> ! {
    panic_with_timeout(status_code, panic_timeout())
}

/// Like [`panic()`], resetting after `iterations` renders (`0`: never) instead of the timeout.
pub fn panic_with_timeout(status_code: u8, iterations: u32) -> ! {
    FaultController::new(ConsoleDisplay, Delay::new(), Reset).panic_latched(
        &LATCH,
        status_code,
        iterations,
    )
}

#[cfg(all(feature = "panic-handler", not(test)))]
#[panic_handler]
fn panic_handler(info: &core::panic::PanicInfo) -> ! {
    #[cfg(feature = "silent-panic")]
    let _ = info;

    #[cfg(not(feature = "silent-panic"))]
    bitcore_debug::println!("panic: {}\n", info);

    panic(StatusCode::RUST_PANIC.get())
}
