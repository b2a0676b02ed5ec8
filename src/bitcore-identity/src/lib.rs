//! Device identity: a stable serial number and the friendly name derived from it.
//!
//! Concrete properties of the serial number are:
//!
//! * It is derived from an identifier that is unique to the piece of hardware (see [`DeviceId`]),
//!   so it does not change across reboots or reprogramming.
//!
//! * It is 32 bits wide, so it is reasonably but not perfectly unique. It is meant for display
//!   and naming, not for security decisions.
//!
//! * If the hardware has no readable identifier, the serial number is `0` rather than an error.
//!
//! The [`FriendlyName`] is a pure function of the serial number.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod cache;
mod codebook;
mod device_id;

pub use codebook::{FriendlyName, CODE_LETTERS, NAME_LENGTH};
pub use device_id::{DeviceId, NoDeviceId, NotImplemented};
pub use cache::{fold_serial, read_serial, IdentityCache, FALLBACK_SERIAL};
