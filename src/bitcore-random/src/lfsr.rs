//! The Galois linear feedback shift register.

use core::num::NonZeroU32;

use bitcore_debug::log;
use rand_core::RngCore;

/// Feedback taps of the register: x^32 + x^22 + x^2 + x + 1.
///
/// The polynomial is primitive, so the register cycles through all 2^32 - 1 non-zero states.
pub const TAPS: u32 = 0x8020_0003;

/// State the generator starts from before it is seeded.
///
/// Configurable through `CONFIG_RANDOM_DEFAULT_SEED`; a value of `0` gives [`FALLBACK_SEED`].
pub const DEFAULT_SEED: u32 = bitcore_utils::u32_from_env_or!(
    "CONFIG_RANDOM_DEFAULT_SEED",
    0xbadc_0ffe,
    "initial state of the random number generator"
);

/// Seed used in place of `0`, which would lock the register up.
pub const FALLBACK_SEED: NonZeroU32 = match NonZeroU32::new(0xbadc_0ffe) {
    Some(seed) => seed,
    None => panic!("fallback seed must not be zero"),
};

/// Returned by [`Lfsr::next()`] when asked for a number below a bound that is not positive.
pub const INVALID_VALUE: i32 = -1001;

/// Number of 32-bit words [`entropy_seed()`] reads from the entropy source.
pub const ENTROPY_WORDS: usize = 2;

/// A 32-bit Galois linear feedback shift register.
///
/// The state is never zero: zero seeds are replaced by [`FALLBACK_SEED`], and a step never leads
/// from a non-zero state to zero.
///
/// This implements [`RngCore`] for interoperability, but is not a `CryptoRng` and must never be
/// used as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    state: NonZeroU32,
}

impl Lfsr {
    /// Creates a generator in the [`DEFAULT_SEED`] state.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }

    /// Creates a generator in the state `seed`, or [`FALLBACK_SEED`] if `seed` is `0`.
    #[must_use]
    pub const fn from_seed(seed: u32) -> Self {
        let state = match NonZeroU32::new(seed) {
            Some(state) => state,
            None => FALLBACK_SEED,
        };
        Self { state }
    }

    /// Replaces the state with `seed`, or [`FALLBACK_SEED`] if `seed` is `0`.
    pub fn seed(&mut self, seed: u32) {
        if seed == 0 {
            log::debug!("zero seed replaced by fallback");
        }
        *self = Self::from_seed(seed);
    }

    /// Seeds the generator from a hardware entropy source.
    ///
    /// # Errors
    ///
    /// Returns the error of the entropy source; the state is left unchanged in that case.
    pub fn seed_from(&mut self, entropy: impl RngCore) -> Result<(), rand_core::Error> {
        self.seed(entropy_seed(entropy)?);
        Ok(())
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state.get()
    }

    /// Advances the register by one step and returns the new state.
    ///
    /// The register shifts right; when a set bit falls out, the taps are XORed in.
    pub fn step(&mut self) -> u32 {
        let state = self.state.get();
        let feedback = (state & 1).wrapping_neg() & TAPS;
        let next = (state >> 1) ^ feedback;
        // bit 31 is set whenever the taps were applied, and `state >> 1` is non-zero otherwise
        self.state = NonZeroU32::new(next).unwrap_or(FALLBACK_SEED);
        next
    }

    /// Returns a pseudo random number in `0..max`, advancing the register by one step.
    ///
    /// Returns [`INVALID_VALUE`] without advancing the register if `max <= 0`.
    ///
    /// The number is the new state modulo `max`. Unless `max` is a power of two, lower results are
    /// slightly more likely than higher ones (by at most `max / 2^32`); rejection sampling would
    /// remove that bias at the cost of an unbounded number of steps, which is not worth it here.
    pub fn next(&mut self, max: i32) -> i32 {
        let Some(bound) = u32::try_from(max).ok().and_then(NonZeroU32::new) else {
            return INVALID_VALUE;
        };
        let value = self.step() % bound;
        // value < max <= i32::MAX
        i32::try_from(value).unwrap_or(INVALID_VALUE)
    }
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for Lfsr {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }
    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, buf);
    }
    fn try_fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(buf);
        Ok(())
    }
}

/// Reads [`ENTROPY_WORDS`] words from `entropy` and folds them into a seed by XOR.
///
/// # Errors
///
/// Returns the error of the entropy source.
pub fn entropy_seed(mut entropy: impl RngCore) -> Result<u32, rand_core::Error> {
    let mut bytes = [0u8; 4 * ENTROPY_WORDS];
    entropy.try_fill_bytes(&mut bytes)?;
    Ok(bytes
        .chunks_exact(4)
        .filter_map(|word| word.try_into().ok())
        .map(u32::from_le_bytes)
        .fold(0, |seed, word| seed ^ word))
}
