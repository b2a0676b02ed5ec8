//! Helpers shared by the bitcore crates.
#![cfg_attr(not(test), no_std)]

pub mod env;
