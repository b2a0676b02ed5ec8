//! Pronounceable names derived from a serial number.

/// Number of characters in a [`FriendlyName`].
pub const NAME_LENGTH: usize = 5;

/// Number of letters per code table, which is the base the serial number is written in.
pub const CODE_LETTERS: u32 = 5;

const CONSONANTS: [u8; CODE_LETTERS as usize] = *b"zvgpt";
const VOWELS: [u8; CODE_LETTERS as usize] = *b"uoiea";

/// Code table for each character position, first character first.
///
/// Alternating consonants and vowels keeps names pronounceable; letters that are easily confused
/// when read aloud or off a small display are left out.
const CODEBOOK: [&[u8; CODE_LETTERS as usize]; NAME_LENGTH] =
    [&CONSONANTS, &VOWELS, &CONSONANTS, &VOWELS, &CONSONANTS];

/// A short, human-pronounceable name for a device.
///
/// The name is a pure function of the serial number: the serial number is written as
/// [`NAME_LENGTH`] base-[`CODE_LETTERS`] digits, least significant digit last, and each digit picks
/// a letter from the code table of its position. Only `serial % 5^5` has an influence on the name,
/// so distinct devices can share a name.
///
/// ```
/// # use bitcore_identity::FriendlyName;
/// assert_eq!(FriendlyName::from_serial(0).as_str(), "zuzuz");
/// assert_eq!(FriendlyName::from_serial(1).as_str(), "zuzuv");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FriendlyName([u8; NAME_LENGTH]);

impl FriendlyName {
    /// Derives the name of the device with the given serial number.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn from_serial(serial: u32) -> Self {
        let mut letters = [0u8; NAME_LENGTH];
        let mut remaining = serial;

        for (letter, code) in letters.iter_mut().zip(CODEBOOK).rev() {
            let digit = remaining % CODE_LETTERS;
            remaining /= CODE_LETTERS;
            // digit < CODE_LETTERS, which is the length of every code table
            *letter = code[digit as usize];
        }

        Self(letters)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: the letters are only ever taken from the ASCII code tables.
        unsafe { core::str::from_utf8_unchecked(&self.0) }
    }
}

impl AsRef<str> for FriendlyName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for FriendlyName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FriendlyName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl core::fmt::Display for FriendlyName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Debug for FriendlyName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("FriendlyName").field(&self.as_str()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FriendlyName {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
