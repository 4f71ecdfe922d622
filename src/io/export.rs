// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PNG export of the composited badge.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Encode the rendered surface as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(bytes)
}

/// Encode and write the rendered surface to `path`.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_encode_png_signature() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_save_png_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speaking-badge.png");
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 2, Rgba([255, 0, 0, 128]));

        save_png(&img, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_save_png_bad_directory() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::new(1, 1);
        assert!(save_png(&img, &dir.path().join("missing/badge.png")).is_err());
    }
}
