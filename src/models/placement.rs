// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Photo placement inside the template frame.
//!
//! The photo is first cover-fitted to the frame (the smallest scale that
//! leaves no gap on either axis), then magnified by the user zoom and
//! shifted by the user offset around the frame center.

use crate::util::geometry::{DrawRect, PixelRect, Point};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom change for one stepper click or wheel tick.
pub const ZOOM_STEP: f64 = 0.05;
/// Granularity of the zoom slider.
pub const SLIDER_STEP: f64 = 0.01;

/// Clamp to [MIN_ZOOM, MAX_ZOOM] and round to two decimals.
fn normalize_zoom(zoom: f64) -> f64 {
    let rounded = (zoom * 100.0).round() / 100.0;
    rounded.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// User zoom and pan applied on top of the cover-fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    zoom: f64,
    offset: Point,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            offset: Point::ZERO,
        }
    }
}

impl Placement {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Displacement of the photo center from the frame center, in native pixels.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = normalize_zoom(zoom);
    }

    pub fn adjust_zoom(&mut self, delta: f64) {
        self.zoom = normalize_zoom(self.zoom + delta);
    }

    /// Offsets are not clamped; a large pan can uncover the frame.
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Back to the plain cover-fit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Rectangle a `photo_w`×`photo_h` photo is drawn into for the given frame.
    pub fn draw_rect(&self, frame: &PixelRect, photo_w: u32, photo_h: u32) -> DrawRect {
        let iw = photo_w as f64;
        let ih = photo_h as f64;
        let base_scale = cover_scale(frame, photo_w, photo_h);
        let scale = base_scale * self.zoom;
        let w = iw * scale;
        let h = ih * scale;

        let center = frame.center();
        let cx = center.x + self.offset.x;
        let cy = center.y + self.offset.y;
        DrawRect {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }
}

/// Smallest scale at which the photo covers the frame on both axes.
pub fn cover_scale(frame: &PixelRect, photo_w: u32, photo_h: u32) -> f64 {
    let sx = frame.w as f64 / photo_w as f64;
    let sy = frame.h as f64 / photo_h as f64;
    sx.max(sy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PixelRect {
        PixelRect::new(459, 337, 500, 625)
    }

    #[test]
    fn test_cover_fit_is_tight_on_one_axis() {
        let placement = Placement::default();
        assert!((cover_scale(&frame(), 800, 400) - 1.5625).abs() < 0.0001);

        let rect = placement.draw_rect(&frame(), 800, 400);
        assert!((rect.w - 1250.0).abs() < 0.0001);
        assert!((rect.h - 625.0).abs() < 0.0001);
        assert!((rect.y - 337.0).abs() < 0.0001);
        assert!(rect.covers(&frame()));
    }

    #[test]
    fn test_zoom_clamped_after_many_steps() {
        let mut placement = Placement::default();
        for _ in 0..100 {
            placement.adjust_zoom(ZOOM_STEP);
            assert!(placement.zoom() >= MIN_ZOOM && placement.zoom() <= MAX_ZOOM);
        }
        assert_eq!(placement.zoom(), 3.0);

        for _ in 0..100 {
            placement.adjust_zoom(-ZOOM_STEP);
            assert!(placement.zoom() >= MIN_ZOOM && placement.zoom() <= MAX_ZOOM);
        }
        assert_eq!(placement.zoom(), 1.0);
    }

    #[test]
    fn test_set_zoom_rounds_and_clamps() {
        let mut placement = Placement::default();
        placement.set_zoom(1.234);
        assert_eq!(placement.zoom(), 1.23);
        placement.set_zoom(7.0);
        assert_eq!(placement.zoom(), 3.0);
        placement.set_zoom(0.2);
        assert_eq!(placement.zoom(), 1.0);
    }

    #[test]
    fn test_adjust_zoom_lands_on_step_grid() {
        let mut placement = Placement::default();
        for _ in 0..7 {
            placement.adjust_zoom(ZOOM_STEP);
        }
        assert_eq!(placement.zoom(), 1.35);
    }

    #[test]
    fn test_center_preserved_without_offset() {
        let mut placement = Placement::default();
        let center = frame().center();
        for &(w, h) in &[(800, 400), (400, 800), (500, 625), (1, 3000), (4000, 3)] {
            for step in 0..=20 {
                placement.set_zoom(1.0 + step as f64 * 0.1);
                let rect = placement.draw_rect(&frame(), w, h);
                assert!((rect.center().x - center.x).abs() < 0.0001);
                assert!((rect.center().y - center.y).abs() < 0.0001);
                assert!(rect.covers(&frame()));
            }
        }
    }

    #[test]
    fn test_offset_shifts_draw_rect() {
        let mut placement = Placement::default();
        let before = placement.draw_rect(&frame(), 800, 400);
        placement.translate(30.0, -12.5);
        placement.translate(-5.0, 2.5);
        let after = placement.draw_rect(&frame(), 800, 400);
        assert!((after.x - before.x - 25.0).abs() < 0.0001);
        assert!((after.y - before.y + 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_offset_is_unclamped() {
        let mut placement = Placement::default();
        placement.set_offset(Point::new(10_000.0, 0.0));
        let rect = placement.draw_rect(&frame(), 800, 400);
        assert!(!rect.covers(&frame()));
    }

    #[test]
    fn test_reset() {
        let mut placement = Placement::default();
        placement.set_zoom(2.5);
        placement.translate(4.0, 4.0);
        assert!(!placement.is_default());
        placement.reset();
        assert!(placement.is_default());
        assert_eq!(placement.zoom(), 1.0);
        assert_eq!(placement.offset(), Point::ZERO);
    }
}
