//! Provides the fast pseudo random number generator of bitcore.
//!
//! The generator is a 32-bit Galois [`Lfsr`]: cheap to step and cheap on power, but **not**
//! cryptographically secure. Do not use it for key material, nonces, or anything else an attacker
//! must not predict.
//!
//! One generator is shared by the whole system. It starts out in a fixed state
//! ([`DEFAULT_SEED`]), so it is usable before any seeding happened, and yields the same sequence on
//! every boot until it is seeded with [`seed_random()`] or [`seed_random_from()`].
//!
//! Applications draw numbers through [`random()`], or through a [`FastRng`] handle where code is
//! written against [`rand_core::RngCore`].
//!
//! The state is shared between thread mode and interrupt handlers; every access to it happens
//! inside a critical section.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod lfsr;

use core::cell::Cell;

use bitcore_debug::log;
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use rand_core::RngCore;

pub use lfsr::{entropy_seed, Lfsr, DEFAULT_SEED, ENTROPY_WORDS, FALLBACK_SEED, INVALID_VALUE, TAPS};

/// The global RNG.
static RNG: Mutex<CriticalSectionRawMutex, Cell<Lfsr>> = Mutex::new(Cell::new(Lfsr::new()));

/// Runs `action` on the global RNG inside a critical section.
///
/// ## Deadlocks
///
/// … never, but `action` runs with interrupts disabled and must be short.
fn with_global<R>(action: impl FnOnce(&mut Lfsr) -> R) -> R {
    RNG.lock(|cell| {
        let mut lfsr = cell.get();
        let result = action(&mut lfsr);
        cell.set(lfsr);
        result
    })
}

/// Returns a pseudo random number in `0..max` from the global generator.
///
/// Returns [`INVALID_VALUE`] without advancing the generator if `max <= 0`.
///
/// See [`Lfsr::next()`] on the distribution of the result.
pub fn random(max: i32) -> i32 {
    with_global(|lfsr| lfsr.next(max))
}

/// Seeds the global generator with `seed`.
///
/// A seed of `0` is replaced by [`FALLBACK_SEED`].
pub fn seed_random(seed: u32) {
    with_global(|lfsr| lfsr.seed(seed));
}

/// Seeds the global generator from a hardware entropy source.
///
/// The entropy source is read outside of the critical section, as hardware RNGs can take a while.
/// Call this once at startup rather than before every draw.
///
/// # Errors
///
/// Returns the error of the entropy source; the generator is left unchanged in that case.
pub fn seed_random_from(entropy: impl RngCore) -> Result<(), rand_core::Error> {
    let seed = entropy_seed(entropy).inspect_err(|_| {
        log::warn!("entropy source failed, keeping the current random state");
    })?;
    seed_random(seed);
    Ok(())
}

/// Returns the current state of the global generator.
pub fn current_state() -> u32 {
    with_global(|lfsr| lfsr.state())
}

/// Handle to the global fast random number generator.
///
/// Every call goes to the global generator, so sequences drawn through different handles
/// interleave.
pub struct FastRng {
    // Make the type not Send to later allow using thread-locals
    _private: core::marker::PhantomData<*const ()>,
}

// Re-implementing the trait rather than handing out the Lfsr: the global state must only be
// touched inside a critical section.
impl RngCore for FastRng {
    fn next_u32(&mut self) -> u32 {
        with_global(Lfsr::next_u32)
    }
    fn next_u64(&mut self) -> u64 {
        with_global(Lfsr::next_u64)
    }
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        with_global(|lfsr| lfsr.fill_bytes(buf));
    }
    fn try_fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), rand_core::Error> {
        with_global(|lfsr| lfsr.try_fill_bytes(buf))
    }
}

/// Obtains a handle to the global fast random number generator.
#[inline]
#[must_use]
pub fn fast_rng() -> FastRng {
    FastRng {
        _private: core::marker::PhantomData,
    }
}
