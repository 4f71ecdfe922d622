// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the rectangle types shared by the placement model
//! and the compositor, and the conversion from the 980×980 design baseline
//! to native template pixels.

use serde::{Deserialize, Serialize};

/// Width and height of the design baseline grid that frame geometry is authored in.
pub const BASELINE: f64 = 980.0;

/// A 2D point (or displacement) in native pixel units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A size in baseline units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// Integer pixel rectangle (frame rects and clip regions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }

    #[cfg(test)]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; empty (zero-sized) when they do not meet.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        PixelRect::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }
}

/// Fractional rectangle a photo is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl DrawRect {
    #[cfg(test)]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True if this rectangle fully covers `rect`.
    #[cfg(test)]
    pub fn covers(&self, rect: &PixelRect) -> bool {
        const EPS: f64 = 1e-9;
        self.x <= rect.x as f64 + EPS
            && self.y <= rect.y as f64 + EPS
            && self.x + self.w >= rect.right() as f64 - EPS
            && self.y + self.h >= rect.bottom() as f64 - EPS
    }
}

/// Scale a baseline-space frame to native pixels of a `width`×`height` raster.
///
/// Each axis is scaled independently and rounded to the nearest pixel so the
/// clip never lands between pixels. `width` and `height` must be non-zero.
pub fn resolve_frame(anchor: Point, size: Size, width: u32, height: u32) -> PixelRect {
    let sx = width as f64 / BASELINE;
    let sy = height as f64 / BASELINE;
    PixelRect {
        x: (anchor.x * sx).round() as i64,
        y: (anchor.y * sy).round() as i64,
        w: (size.w * sx).round() as i64,
        h: (size.h * sy).round() as i64,
    }
}
