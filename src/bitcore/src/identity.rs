//! Access to the identity of the device.
//!
//! See [`bitcore_identity`] for the properties of the values.

use bitcore_identity::{DeviceId as _, IdentityCache};

use crate::arch::identity::DeviceId;

#[doc(inline)]
pub use bitcore_identity::{FriendlyName, NAME_LENGTH};

static IDENTITY: IdentityCache = IdentityCache::new();

/// Returns the serial number of the device.
///
/// The hardware identifier is read on the first call only. If the device has no readable
/// identifier, this is `0`.
pub fn serial_number() -> u32 {
    IDENTITY.serial_number::<DeviceId>()
}

/// Returns the friendly name of the device, derived from [`serial_number()`].
pub fn friendly_name() -> &'static FriendlyName {
    IDENTITY.friendly_name::<DeviceId>()
}

/// Obtains the unique identifier of the device in its byte serialized form.
///
/// This reads the hardware on every call and is not folded into 32 bits.
///
/// # Errors
///
/// This errs if the device has no identifier, or reading it is not implemented.
pub fn device_id_bytes() -> Result<impl AsRef<[u8]>, impl core::error::Error> {
    DeviceId::get().map(|d| d.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_has_no_identifier() {
        assert!(device_id_bytes().is_err());
        assert_eq!(serial_number(), bitcore_identity::FALLBACK_SERIAL);
        assert_eq!(serial_number(), serial_number());
        assert_eq!(friendly_name(), "zuzuz");
        assert_eq!(friendly_name().as_str().len(), NAME_LENGTH);
    }
}
