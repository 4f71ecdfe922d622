// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Output raster with a scoped clip region.

use crate::util::geometry::PixelRect;
use image::{Pixel, Rgba, RgbaImage};
use std::ops::{Deref, DerefMut};

/// RGBA drawing surface. Draw calls never touch pixels outside the clip.
#[derive(Debug)]
pub struct Surface {
    pixels: RgbaImage,
    clip: PixelRect,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            clip: PixelRect::new(0, 0, width as i64, height as i64),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn clip(&self) -> PixelRect {
        self.clip
    }

    fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width() as i64, self.height() as i64)
    }

    /// Reallocate to `width`×`height` if the size differs. Returns true if it did.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.pixels.dimensions() == (width, height) {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    /// Make every pixel transparent, ignoring the clip.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Narrow the clip to `rect` until the returned guard is dropped.
    pub fn clipped(&mut self, rect: PixelRect) -> ClipGuard<'_> {
        let saved = self.clip;
        self.clip = saved.intersect(&rect);
        ClipGuard {
            surface: self,
            saved,
        }
    }

    /// Source-over `src` with its top-left corner at (`x`, `y`).
    pub fn draw_image(&mut self, src: &RgbaImage, x: i64, y: i64) {
        let target = PixelRect::new(x, y, src.width() as i64, src.height() as i64)
            .intersect(&self.clip)
            .intersect(&self.bounds());
        if target.is_empty() {
            return;
        }
        for dy in target.y..target.bottom() {
            for dx in target.x..target.right() {
                let s = src.get_pixel((dx - x) as u32, (dy - y) as u32);
                let d = self.pixels.get_pixel_mut(dx as u32, dy as u32);
                match s[3] {
                    0 => {}
                    255 => *d = *s,
                    _ => d.blend(s),
                }
            }
        }
    }
}

/// Restores the previous clip when dropped.
pub struct ClipGuard<'a> {
    surface: &'a mut Surface,
    saved: PixelRect,
}

impl Deref for ClipGuard<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &*self.surface
    }
}

impl DerefMut for ClipGuard<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut *self.surface
    }
}

impl Drop for ClipGuard<'_> {
    fn drop(&mut self) {
        self.surface.clip = self.saved;
    }
}
