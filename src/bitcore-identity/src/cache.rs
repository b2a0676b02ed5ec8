//! Reading the hardware identifier once and keeping what is derived from it.

use bitcore_debug::log;
use once_cell::sync::OnceCell;

use crate::{DeviceId, FriendlyName};

/// Serial number used when the hardware identifier cannot be read.
pub const FALLBACK_SERIAL: u32 = 0;

/// Folds the bytes of a hardware identifier into a 32-bit serial number.
///
/// The bytes are read as little-endian 32-bit words, the last one padded with zeros, and all words
/// are XORed together. An identifier of at most four bytes is thus taken as is.
#[must_use]
pub fn fold_serial(bytes: &[u8]) -> u32 {
    bytes.chunks(4).fold(0, |serial, chunk| {
        let mut word = [0u8; 4];
        word.iter_mut().zip(chunk).for_each(|(w, b)| *w = *b);
        serial ^ u32::from_le_bytes(word)
    })
}

/// Reads the hardware identifier `D` and folds it into a serial number.
///
/// Falls back to [`FALLBACK_SERIAL`] if the identifier is not available.
#[must_use]
pub fn read_serial<D: DeviceId>() -> u32 {
    match D::get() {
        Ok(id) => {
            let serial = fold_serial(id.bytes().as_ref());
            log::debug!("serial number: {=u32:#x}", serial);
            serial
        }
        Err(_) => {
            log::warn!("device ID is not available, using fallback serial number");
            FALLBACK_SERIAL
        }
    }
}

/// Initialize-once storage for the serial number and friendly name.
///
/// The hardware identifier is read on first use only; afterwards, both values are read without
/// taking a critical section.
pub struct IdentityCache {
    serial: OnceCell<u32>,
    name: OnceCell<FriendlyName>,
}

impl IdentityCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            serial: OnceCell::new(),
            name: OnceCell::new(),
        }
    }

    /// Returns the serial number, reading it from `D` on first use.
    ///
    /// The first `D` a cache is used with determines the value for its whole lifetime.
    pub fn serial_number<D: DeviceId>(&self) -> u32 {
        *self.serial.get_or_init(read_serial::<D>)
    }

    /// Returns the friendly name derived from [`serial_number()`](Self::serial_number).
    pub fn friendly_name<D: DeviceId>(&self) -> &FriendlyName {
        self.name
            .get_or_init(|| FriendlyName::from_serial(self.serial_number::<D>()))
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoDeviceId, NotImplemented};
    use core::sync::atomic::{AtomicUsize, Ordering};

    static READS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug)]
    struct CountingId;

    impl DeviceId for CountingId {
        type Error = core::convert::Infallible;
        type Bytes = [u8; 8];

        fn get() -> Result<Self, Self::Error> {
            READS.fetch_add(1, Ordering::SeqCst);
            Ok(CountingId)
        }

        fn bytes(&self) -> [u8; 8] {
            [0x78, 0x56, 0x34, 0x12, 0x01, 0x00, 0x00, 0x00]
        }
    }

    #[test]
    fn fold_words() {
        assert_eq!(fold_serial(&[]), 0);
        assert_eq!(fold_serial(&[0x01]), 0x01);
        assert_eq!(fold_serial(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(
            fold_serial(&[0xaa, 0xbb, 0xcc, 0xdd, 0x01]),
            0xddcc_bbab
        );
        // nRF FICR DEVICEID[0], DEVICEID[1]
        let mut ficr = [0u8; 8];
        ficr[..4].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        ficr[4..].copy_from_slice(&0x9abc_def0u32.to_le_bytes());
        assert_eq!(fold_serial(&ficr), 0x1234_5678 ^ 0x9abc_def0);
    }

    #[test]
    fn serial_is_read_once() {
        let cache = IdentityCache::new();

        let first = cache.serial_number::<CountingId>();
        let second = cache.serial_number::<CountingId>();

        assert_eq!(first, 0x1234_5679);
        assert_eq!(first, second);
        assert_eq!(READS.load(Ordering::SeqCst), 1);

        assert_eq!(cache.friendly_name::<CountingId>(), "vazag");
        assert_eq!(READS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_id_falls_back() {
        let cache = IdentityCache::new();

        assert_eq!(
            cache.serial_number::<NoDeviceId<NotImplemented>>(),
            FALLBACK_SERIAL
        );
        assert_eq!(cache.friendly_name::<NoDeviceId<NotImplemented>>(), "zuzuz");
    }
}
