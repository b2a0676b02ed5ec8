//! bitcore provides the device services of a microcontroller runtime: a stable serial number and a
//! pronounceable name for the device, a fast pseudo random number generator, and the fault state
//! the system freezes in when something unrecoverable happens.
//!
//! All state is process-wide and owned by this crate; it is reached through accessor functions
//! only:
//!
//! * [`identity`]: [`serial_number()`](identity::serial_number),
//!   [`friendly_name()`](identity::friendly_name)
//! * [`random`]: [`random()`](random::random), [`seed_random()`](random::seed_random),
//!   [`seed_random_from_entropy()`](random::seed_random_from_entropy)
//! * [`fault`]: [`panic()`](fault::panic), [`set_panic_timeout()`](fault::set_panic_timeout)
//! * [`reset()`]
//!
//! Call [`init()`] once at startup.
//!
//! # Cargo features
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

mod arch;
pub mod buildinfo;
pub mod fault;
pub mod identity;
pub mod random;

#[doc(inline)]
pub use bitcore_debug as debug;

pub use fault::panic;

use bitcore_debug::log;
use bitcore_fault::HardReset as _;

/// Brings up the device services.
///
/// Initializes the debug console and seeds the random number generator from the hardware entropy
/// source. Without an entropy source, the generator keeps its default state.
pub fn init() {
    bitcore_debug::init();

    // Failures are logged, and the generator is usable without entropy.
    let _ = random::seed_random_from_entropy();

    log::info!(
        "bitcore {=str} on {=str}, device {=str}",
        buildinfo::VERSION,
        buildinfo::BOARD,
        identity::friendly_name().as_str()
    );
}

/// Performs a hard reset of the device.
///
/// On platforms without a reset (host builds), this exits through the debug console, if there is
/// one, and halts.
///
/// ```no_run
/// if bitcore::random::random(10) == 0 {
///     bitcore::reset();
/// }
/// ```
pub fn reset() -> ! {
    arch::reset::Reset.reset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn init_without_hardware() {
        random::seed_random(1);
        init();

        assert_eq!(random::current_state(), 1);
        assert_eq!(identity::friendly_name(), "zuzuz");
    }
}
