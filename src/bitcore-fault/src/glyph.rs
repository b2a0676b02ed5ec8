/// Width and height of a [`Glyph`], in pixels.
pub const GLYPH_SIZE: usize = 5;

/// A monochrome image for a 5×5 LED matrix, with a text form for character displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    text: &'static str,
    rows: [u8; GLYPH_SIZE],
}

impl Glyph {
    /// Creates a glyph.
    ///
    /// Each row holds one pixel per bit, most significant of the five bits leftmost.
    #[must_use]
    pub const fn new(text: &'static str, rows: [u8; GLYPH_SIZE]) -> Self {
        Self { text, rows }
    }

    /// Returns the text form of the glyph.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Returns whether the pixel in column `x` of row `y` is lit.
    #[must_use]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < GLYPH_SIZE
            && self
                .rows
                .get(y)
                .is_some_and(|row| row & (1 << (GLYPH_SIZE - 1 - x)) != 0)
    }
}

/// The sad face shown on a fault.
pub const DISTRESS_GLYPH: Glyph = Glyph::new(
    "=(",
    [0b01010, 0b00000, 0b00000, 0b01110, 0b10001],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distress_glyph_pixels() {
        assert!(DISTRESS_GLYPH.is_lit(1, 0));
        assert!(DISTRESS_GLYPH.is_lit(3, 0));
        assert!(!DISTRESS_GLYPH.is_lit(2, 0));
        assert!(DISTRESS_GLYPH.is_lit(0, 4));
        assert!(DISTRESS_GLYPH.is_lit(4, 4));
        assert!(!DISTRESS_GLYPH.is_lit(2, 2));
        assert!(!DISTRESS_GLYPH.is_lit(5, 0));
        assert!(!DISTRESS_GLYPH.is_lit(0, 5));
        assert_eq!(DISTRESS_GLYPH.text(), "=(");
    }
}
