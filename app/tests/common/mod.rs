use std::fs;
use std::ops::Range;
use std::path::Path;

use image::{Rgb, RgbImage};

pub const BORDER: Rgb<u8> = Rgb([250, 250, 250]);
pub const CONTENT: Rgb<u8> = Rgb([10, 90, 200]);

/// Write a PNG whose rows are `BORDER` except for `content` rows.
pub fn write_scan(path: &Path, width: u32, height: u32, content: Range<u32>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_fn(width, height, |_, y| {
        if content.contains(&y) { CONTENT } else { BORDER }
    })
    .save(path)
    .expect("write png fixture");
}
