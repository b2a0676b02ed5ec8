//! Platform glue for the device services.
//!
//! Each platform provides:
//!
//! * `identity::DeviceId`: the hardware identifier,
//! * `hwrng::Entropy`: the hardware entropy source,
//! * `delay::Delay`: the wait between two renders of a fault,
//! * `reset::Reset`: the hard reset.

cfg_if::cfg_if! {
    if #[cfg(context = "nrf")] {
        mod nrf;
        pub(crate) use nrf::*;
    } else if #[cfg(context = "bitcore")] {
        // When built for a board, but the MCU family is not supported
        compile_error!("device services are not implemented for this MCU family");
    } else {
        // Provide a default platform, for host builds and tests
        mod dummy;
        pub(crate) use dummy::*;
    }
}

/// Core clock frequency of the MCU family after reset, in Hz.
#[cfg(context = "nrf51")]
const DEFAULT_CORE_CLOCK_HZ: u32 = 16_000_000;
/// Core clock frequency of the MCU family after reset, in Hz.
#[cfg(not(context = "nrf51"))]
const DEFAULT_CORE_CLOCK_HZ: u32 = 64_000_000;

/// Core clock frequency, used to turn durations into cycles.
#[cfg_attr(not(context = "nrf"), allow(dead_code))]
pub(crate) const CORE_CLOCK_HZ: u32 = bitcore_utils::u32_from_env_or!(
    "CONFIG_CORE_CLOCK_HZ",
    DEFAULT_CORE_CLOCK_HZ,
    "core clock frequency in Hz"
);

/// Number of cycles a busy-wait of `ns` nanoseconds takes at `clock_hz`, saturating.
#[cfg_attr(not(context = "nrf"), allow(dead_code))]
pub(crate) fn cycles_for(ns: u32, clock_hz: u32) -> u32 {
    let cycles = u64::from(ns) * u64::from(clock_hz) / 1_000_000_000;
    u32::try_from(cycles).unwrap_or(u32::MAX)
}
