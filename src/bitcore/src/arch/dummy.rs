//! Host platform: no identifier, no entropy, and no way to reset.

pub(crate) mod identity {
    use bitcore_identity::{NoDeviceId, NotImplemented};

    pub(crate) type DeviceId = NoDeviceId<NotImplemented>;
}

pub(crate) mod hwrng {
    use core::num::NonZeroU32;

    use rand_core::RngCore;

    const NO_ENTROPY: NonZeroU32 = match NonZeroU32::new(rand_core::Error::CUSTOM_START) {
        Some(code) => code,
        None => panic!("error code must not be zero"),
    };

    /// Entropy source of a platform that has none.
    ///
    /// The infallible methods produce zeros; only [`RngCore::try_fill_bytes()`] reports the
    /// missing source.
    pub(crate) struct Entropy;

    impl Entropy {
        pub(crate) fn new() -> Self {
            Self
        }
    }

    impl RngCore for Entropy {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, buf: &mut [u8]) {
            buf.fill(0);
        }
        fn try_fill_bytes(&mut self, _buf: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(NO_ENTROPY.into())
        }
    }
}

pub(crate) mod delay {
    use embedded_hal::delay::DelayNs;

    /// Busy-waits without knowing the clock speed.
    pub(crate) struct Delay;

    impl Delay {
        pub(crate) fn new() -> Self {
            Self
        }
    }

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            for _ in 0..ns {
                core::hint::spin_loop();
            }
        }
    }
}

pub(crate) mod reset {
    use bitcore_fault::HardReset;

    /// Stops the system through the debug console, if there is one, or halts.
    pub(crate) struct Reset;

    impl HardReset for Reset {
        fn reset(&mut self) -> ! {
            bitcore_debug::exit(bitcore_debug::EXIT_FAILURE);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    }
}
