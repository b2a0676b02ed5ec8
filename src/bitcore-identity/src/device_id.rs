//! Traits and types describing the hardware identifier of a board.

/// Trait describing the unique identifier available on a board.
///
/// # Evolution
///
/// In its current state, this type is mainly a wrapper around a binary identifier with a
/// length constant at build time.
pub trait DeviceId: Sized + core::fmt::Debug {
    /// Error type indicating that no identifier is available.
    ///
    /// This is part of the return type of the [`::get()`][Self::get] constructor.
    ///
    /// It is encouraged to be [`core::convert::Infallible`] where possible.
    type Error: core::error::Error;

    /// Some `[u8; N]` type, returned by [`.bytes()`][Self::bytes].
    ///
    /// This may not represent all the identifying information available on the board, but can
    /// represent a unique portion thereof.
    type Bytes: AsRef<[u8]>;

    /// Reads the unique identifier of the device.
    ///
    /// This is expected to touch hardware; callers that need the value repeatedly go through
    /// [`IdentityCache`][crate::IdentityCache].
    ///
    /// # Errors
    ///
    /// This produces an error if no device ID is available on this board, or is not implemented.
    fn get() -> Result<Self, Self::Error>;

    /// The device identifier in serialized bytes format.
    fn bytes(&self) -> Self::Bytes;
}

/// An uninhabited type implementing [`DeviceId`] that always errs.
///
/// This can be used both on architectures that do not have a unique identifier on their boards,
/// and when it has not yet been implemented.
///
/// A typical type for `E` is [`NotImplemented`].
#[derive(Debug)]
pub struct NoDeviceId<E: core::error::Error + Default>(
    core::convert::Infallible,
    core::marker::PhantomData<E>,
);

impl<E: core::error::Error + Default> DeviceId for NoDeviceId<E> {
    type Error = E;

    type Bytes = [u8; 0];

    fn get() -> Result<Self, Self::Error> {
        Err(Default::default())
    }

    fn bytes(&self) -> [u8; 0] {
        match self.0 {}
    }
}

/// Error indicating that a [`DeviceId`] may be available on this platform, but is not implemented.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotImplemented;

impl core::fmt::Display for NotImplemented {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Device ID not implemented on this platform")
    }
}

impl core::error::Error for NotImplemented {}
