//! The fast, non-cryptographic random number generator.
//!
//! See [`bitcore_random`] for details on the generator.

#[doc(inline)]
pub use bitcore_random::{
    current_state, fast_rng, random, seed_random, FastRng, Lfsr, INVALID_VALUE,
};

use crate::arch::hwrng::Entropy;

/// Seeds the generator from the hardware entropy source of the device.
///
/// This can take a while and draws power; call it once at startup, [`init()`](crate::init) does.
///
/// # Errors
///
/// This errs if the device has no entropy source; the generator is left unchanged then.
pub fn seed_random_from_entropy() -> Result<(), rand_core::Error> {
    bitcore_random::seed_random_from(Entropy::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn host_has_no_entropy() {
        seed_random(0x00c0_ffee);

        assert!(seed_random_from_entropy().is_err());
        assert_eq!(current_state(), 0x00c0_ffee);

        let value = random(6);
        assert!((0..6).contains(&value));
        assert_eq!(random(0), INVALID_VALUE);
    }
}
