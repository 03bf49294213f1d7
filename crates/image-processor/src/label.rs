//! Sequence labels stamped onto tiles before composition.
//!
//! Labels are drawn into each tile rather than onto the final canvas, so
//! labeling can be skipped or restyled without touching the grid layout.

use ab_glyph::{FontVec, PxScale};
use image::Rgba;
use imageproc::drawing::draw_text_mut;

use crate::glyphs::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_SCALE, GLYPH_WIDTH};
use crate::{ImageProcessorError, PixelBuffer, Result};

/// Accent color for labels: RGB(200, 100, 0), opaque, widened to 16 bits.
pub const LABEL_ACCENT: Rgba<u16> = Rgba([200 * 257, 100 * 257, 0, u16::MAX]);

/// Offset of the label's top-left corner from the tile's top-left corner.
pub const LABEL_OFFSET: (i32, i32) = (10, 3);

/// Default pixel size when labels are drawn with a TrueType font.
pub const DEFAULT_LABEL_FONT_SIZE: f32 = 16.0;

/// Glyph source for labels.
pub enum LabelFace {
    /// The built-in bitmap digits.
    Builtin,
    /// A TrueType/OpenType font rasterized at `scale`.
    Font { font: FontVec, scale: PxScale },
}

impl LabelFace {
    /// Load a font face from raw TTF/OTF bytes.
    pub fn from_font_bytes(data: Vec<u8>, size: f32) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| ImageProcessorError::InvalidFont(e.to_string()))?;
        Ok(Self::Font {
            font,
            scale: PxScale::from(size),
        })
    }
}

impl std::fmt::Debug for LabelFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str("Builtin"),
            Self::Font { scale, .. } => f.debug_struct("Font").field("scale", scale).finish(),
        }
    }
}

/// How labels look and where they go.
#[derive(Debug)]
pub struct LabelStyle {
    pub face: LabelFace,
    pub color: Rgba<u16>,
    pub offset: (i32, i32),
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            face: LabelFace::Builtin,
            color: LABEL_ACCENT,
            offset: LABEL_OFFSET,
        }
    }
}

/// Label text for the `index`-th (0-based) tile: "01", "02", ...
pub fn sequence_label(index: usize) -> String {
    format!("{:02}", index + 1)
}

/// Draw `text` onto `img` at the style's offset. Pixels outside the image are clipped.
pub fn draw_label(img: &mut PixelBuffer, text: &str, style: &LabelStyle) {
    let (x, y) = style.offset;
    match &style.face {
        LabelFace::Builtin => draw_builtin(img, text, x, y, style.color),
        LabelFace::Font { font, scale } => {
            draw_text_mut(img, style.color, x, y, *scale, font, text)
        }
    }
}

/// Stamp each tile with its 1-based sequence number.
pub fn label_sequence(images: &mut [PixelBuffer], style: &LabelStyle) {
    for (index, img) in images.iter_mut().enumerate() {
        draw_label(img, &sequence_label(index), style);
    }
}

fn draw_builtin(img: &mut PixelBuffer, text: &str, x: i32, y: i32, color: Rgba<u16>) {
    let (width, height) = (i64::from(img.width()), i64::from(img.height()));
    let mut origin_x = i64::from(x);
    let origin_y = i64::from(y);

    for ch in text.chars() {
        if let Some(rows) = glyphs::glyph(ch) {
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !glyphs::is_set(rows, col, row) {
                        continue;
                    }
                    for dy in 0..GLYPH_SCALE {
                        for dx in 0..GLYPH_SCALE {
                            let px = origin_x + i64::from(col * GLYPH_SCALE + dx);
                            let py = origin_y + i64::from(row * GLYPH_SCALE + dy);
                            if (0..width).contains(&px) && (0..height).contains(&py) {
                                img.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        origin_x += i64::from(GLYPH_ADVANCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accent_pixels(img: &PixelBuffer) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| **p == LABEL_ACCENT)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn sequence_labels_are_zero_padded_and_one_based() {
        assert_eq!(sequence_label(0), "01");
        assert_eq!(sequence_label(8), "09");
        assert_eq!(sequence_label(9), "10");
        assert_eq!(sequence_label(99), "100");
    }

    #[test]
    fn accent_is_widened_from_eight_bits() {
        assert_eq!(LABEL_ACCENT, Rgba([51400, 25700, 0, 65535]));
    }

    #[test]
    fn builtin_label_stays_inside_its_box() {
        let mut img = PixelBuffer::new(64, 32);
        draw_label(&mut img, "01", &LabelStyle::default());

        let inked = accent_pixels(&img);
        assert!(!inked.is_empty());
        let (ox, oy) = (LABEL_OFFSET.0 as u32, LABEL_OFFSET.1 as u32);
        for &(x, y) in &inked {
            assert!(x >= ox && x < ox + 2 * GLYPH_ADVANCE, "x={x}");
            assert!(y >= oy && y < oy + GLYPH_HEIGHT * GLYPH_SCALE, "y={y}");
        }
        // The first glyph's top row ("0" is 01110) starts one unit in.
        assert_eq!(img.get_pixel(ox + GLYPH_SCALE, oy), &LABEL_ACCENT);
        assert_eq!(img.get_pixel(ox, oy), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn label_is_clipped_on_tiny_images() {
        let mut img = PixelBuffer::new(16, 5);
        draw_label(&mut img, "88", &LabelStyle::default());
        assert!(!accent_pixels(&img).is_empty());
        assert_eq!(img.dimensions(), (16, 5));
    }

    #[test]
    fn negative_offset_and_unknown_chars_do_not_panic() {
        let mut img = PixelBuffer::new(8, 8);
        let style = LabelStyle {
            offset: (-20, -20),
            ..LabelStyle::default()
        };
        draw_label(&mut img, "x1?", &style);
        assert!(accent_pixels(&img).is_empty());
    }

    #[test]
    fn label_sequence_marks_every_tile() {
        let mut images = vec![PixelBuffer::new(40, 20), PixelBuffer::new(40, 20)];
        label_sequence(&mut images, &LabelStyle::default());
        assert!(images.iter().all(|img| !accent_pixels(img).is_empty()));
        // "01" and "02" differ in their second glyph.
        assert_ne!(images[0], images[1]);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let err = LabelFace::from_font_bytes(b"not a font".to_vec(), DEFAULT_LABEL_FONT_SIZE);
        assert!(matches!(err, Err(ImageProcessorError::InvalidFont(_))));
    }
}
