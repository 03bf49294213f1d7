//! Built-in 5x7 monospace digit glyphs.

/// Glyph width in font units.
pub(crate) const GLYPH_WIDTH: u32 = 5;

/// Glyph height in font units.
pub(crate) const GLYPH_HEIGHT: u32 = 7;

/// Pixels per font unit when rendering.
pub(crate) const GLYPH_SCALE: u32 = 2;

/// Horizontal distance between glyph origins, in pixels.
pub(crate) const GLYPH_ADVANCE: u32 = (GLYPH_WIDTH + 1) * GLYPH_SCALE;

// One byte per row, bit 4 is the leftmost column.
const DIGITS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Bitmap rows for `ch`, or `None` when the glyph set has no such character.
pub(crate) fn glyph(ch: char) -> Option<&'static [u8; GLYPH_HEIGHT as usize]> {
    ch.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Whether the font unit at (`col`, `row`) of `rows` is inked.
pub(crate) fn is_set(rows: &[u8; GLYPH_HEIGHT as usize], col: u32, row: u32) -> bool {
    rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_have_glyphs() {
        for ch in '0'..='9' {
            assert!(glyph(ch).is_some(), "missing glyph for {ch}");
        }
        assert!(glyph('a').is_none());
        assert!(glyph(' ').is_none());
    }

    #[test]
    fn bitmaps_fit_glyph_width() {
        for rows in &DIGITS {
            assert!(rows.iter().all(|&r| r < (1 << GLYPH_WIDTH)));
        }
    }

    #[test]
    fn one_has_a_centered_stem() {
        let one = glyph('1').unwrap();
        assert!(is_set(one, 2, 3));
        assert!(!is_set(one, 0, 3));
        assert!(!is_set(one, 4, 3));
    }
}
