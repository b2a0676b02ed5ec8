//! nRF51 and nRF52 platform.
//!
//! The peripherals used here sit at the same addresses on both families, and are accessed
//! through stolen registers rather than threaded through a HAL: all that is needed is a few
//! register accesses that nothing else in the system competes for.

pub(crate) mod identity {
    /// Address of FICR `DEVICEID[0]`, followed by `DEVICEID[1]`.
    const FICR_DEVICEID: *const [u32; 2] = 0x1000_0060 as *const [u32; 2];

    /// The DEVICEID from the FICR peripheral.
    #[derive(Debug)]
    pub(crate) struct DeviceId([u32; 2]);

    impl bitcore_identity::DeviceId for DeviceId {
        type Error = core::convert::Infallible;

        /// Both words, `DEVICEID[0]` first, in little-endian order.
        type Bytes = [u8; 8];

        fn get() -> Result<Self, Self::Error> {
            // SAFETY: the FICR is read-only memory that is always mapped.
            let words = unsafe { core::ptr::read_volatile(FICR_DEVICEID) };
            Ok(Self(words))
        }

        fn bytes(&self) -> [u8; 8] {
            let mut bytes = [0u8; 8];
            for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.0) {
                chunk.copy_from_slice(&word.to_le_bytes());
            }
            bytes
        }
    }
}

pub(crate) mod hwrng {
    use core::ptr::{read_volatile, write_volatile};

    use rand_core::RngCore;

    const RNG_BASE: usize = 0x4000_d000;
    const TASKS_START: *mut u32 = RNG_BASE as *mut u32;
    const TASKS_STOP: *mut u32 = (RNG_BASE + 0x004) as *mut u32;
    const EVENTS_VALRDY: *mut u32 = (RNG_BASE + 0x100) as *mut u32;
    const VALUE: *const u32 = (RNG_BASE + 0x508) as *const u32;

    /// The RNG peripheral, polled one byte at a time.
    ///
    /// Each byte takes tens of microseconds, and the peripheral draws considerably more power
    /// than the CPU while running.
    pub(crate) struct Entropy;

    impl Entropy {
        pub(crate) fn new() -> Self {
            Self
        }

        fn read_byte(&mut self) -> u8 {
            // SAFETY: the RNG registers are not used anywhere else.
            unsafe {
                write_volatile(EVENTS_VALRDY, 0);
                while read_volatile(EVENTS_VALRDY) == 0 {
                    core::hint::spin_loop();
                }
                read_volatile(VALUE).to_le_bytes()[0]
            }
        }
    }

    impl RngCore for Entropy {
        fn next_u32(&mut self) -> u32 {
            rand_core::impls::next_u32_via_fill(self)
        }
        fn next_u64(&mut self) -> u64 {
            rand_core::impls::next_u64_via_fill(self)
        }
        fn fill_bytes(&mut self, buf: &mut [u8]) {
            // SAFETY: the RNG registers are not used anywhere else.
            unsafe { write_volatile(TASKS_START, 1) };
            for byte in buf.iter_mut() {
                *byte = self.read_byte();
            }
            // SAFETY: as above.
            unsafe { write_volatile(TASKS_STOP, 1) };
        }
        fn try_fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(buf);
            Ok(())
        }
    }
}

pub(crate) mod delay {
    use embedded_hal::delay::DelayNs;

    use crate::arch::{cycles_for, CORE_CLOCK_HZ};

    /// Busy-waits by counting CPU cycles.
    pub(crate) struct Delay;

    impl Delay {
        pub(crate) fn new() -> Self {
            Self
        }
    }

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            cortex_m::asm::delay(cycles_for(ns, CORE_CLOCK_HZ));
        }
    }
}

pub(crate) mod reset {
    use bitcore_fault::HardReset;

    /// System reset through the SCB.
    pub(crate) struct Reset;

    impl HardReset for Reset {
        fn reset(&mut self) -> ! {
            cortex_m::peripheral::SCB::sys_reset()
        }
    }
}
