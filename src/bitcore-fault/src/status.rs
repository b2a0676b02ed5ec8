use core::fmt::Write as _;

/// Status code shown with the distress glyph.
///
/// `0` means no code is shown, only the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusCode(u8);

impl StatusCode {
    /// No status code.
    pub const NONE: Self = Self(0);
    /// The heap allocator ran out of memory.
    pub const OUT_OF_MEMORY: Self = Self(20);
    /// The heap allocator found its data structures corrupted.
    pub const HEAP_ERROR: Self = Self(30);
    /// A null pointer was dereferenced.
    pub const NULL_DEREFERENCE: Self = Self(40);
    /// An I2C bus transaction failed in a way the driver cannot recover from.
    pub const I2C_ERROR: Self = Self(50);
    /// A Rust panic reached the panic handler.
    pub const RUST_PANIC: Self = Self(99);

    /// Creates a status code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the decimal digits to display, without leading zeros.
    ///
    /// This is empty for [`StatusCode::NONE`].
    #[must_use]
    pub fn digits(self) -> heapless::String<3> {
        let mut digits = heapless::String::new();
        if self != Self::NONE {
            // a u8 has at most three decimal digits
            let _ = write!(digits, "{}", self.0);
        }
        digits
    }
}

impl From<u8> for StatusCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl core::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.digits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits() {
        assert_eq!(StatusCode::NONE.digits(), "");
        assert_eq!(StatusCode::new(7).digits(), "7");
        assert_eq!(StatusCode::OUT_OF_MEMORY.digits(), "20");
        assert_eq!(StatusCode::new(255).digits(), "255");
        assert_eq!(StatusCode::from(99), StatusCode::RUST_PANIC);
    }
}
