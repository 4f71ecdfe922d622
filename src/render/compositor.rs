// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Badge compositing.
//!
//! One render pass draws the template artwork at native size and, if a
//! photo is loaded, the placed photo clipped to the template's frame. The
//! whole pass re-runs on every change; there is no incremental redraw.

use super::surface::Surface;
use crate::models::placement::Placement;
use crate::models::session::Session;
use crate::models::template::Template;
use crate::util::geometry::{DrawRect, PixelRect};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Owns the output surface the preview and the exporter read from.
#[derive(Debug, Default)]
pub struct Compositor {
    surface: Option<Surface>,
}

impl Compositor {
    pub fn new() -> Self {
        Self { surface: None }
    }

    /// Last rendered output, if any pass has completed.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn render_session(&mut self, session: &Session) -> bool {
        self.render(
            session.template(),
            session.template_image(),
            session.photo(),
            session.placement(),
        )
    }

    /// Run a full render pass. Returns false (and draws nothing) until the
    /// template artwork is available.
    pub fn render(
        &mut self,
        template: &Template,
        template_image: Option<&RgbaImage>,
        photo: Option<&RgbaImage>,
        placement: &Placement,
    ) -> bool {
        let Some(artwork) = template_image else {
            return false;
        };
        let (width, height) = artwork.dimensions();
        if width == 0 || height == 0 {
            return false;
        }

        let surface = self
            .surface
            .get_or_insert_with(|| Surface::new(width, height));
        if surface.ensure_size(width, height) {
            log::debug!("Output surface resized to {}x{}", width, height);
        }
        surface.clear();
        surface.draw_image(artwork, 0, 0);

        let Some(photo) = photo else {
            return true;
        };
        if photo.width() == 0 || photo.height() == 0 {
            return true;
        }

        let frame = template.frame_rect(width, height);
        let rect = placement.draw_rect(&frame, photo.width(), photo.height());
        let mut clipped = surface.clipped(frame);
        draw_photo(&mut clipped, photo, rect);
        true
    }
}

/// Draw `photo` stretched over `rect`, resampling only the part that lands
/// inside the current clip.
fn draw_photo(surface: &mut Surface, photo: &RgbaImage, rect: DrawRect) {
    let (iw, ih) = photo.dimensions();
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }

    let x0 = rect.x.floor() as i64;
    let y0 = rect.y.floor() as i64;
    let footprint = PixelRect::new(
        x0,
        y0,
        (rect.x + rect.w).ceil() as i64 - x0,
        (rect.y + rect.h).ceil() as i64 - y0,
    );
    let visible = surface.clip().intersect(&footprint);
    if visible.is_empty() {
        return;
    }

    let sx = rect.w / iw as f64;
    let sy = rect.h / ih as f64;
    let (src_x0, src_x1) = source_span(visible.x, visible.right(), rect.x, sx, iw);
    let (src_y0, src_y1) = source_span(visible.y, visible.bottom(), rect.y, sy, ih);

    // Snap outward so the resampled crop never leaves a seam inside the clip
    let dest_x = (rect.x + src_x0 as f64 * sx).floor() as i64;
    let dest_y = (rect.y + src_y0 as f64 * sy).floor() as i64;
    let dest_w = ((rect.x + src_x1 as f64 * sx).ceil() as i64 - dest_x).max(1) as u32;
    let dest_h = ((rect.y + src_y1 as f64 * sy).ceil() as i64 - dest_y).max(1) as u32;

    let crop = imageops::crop_imm(photo, src_x0, src_y0, src_x1 - src_x0, src_y1 - src_y0).to_image();
    let resized = imageops::resize(&crop, dest_w, dest_h, FilterType::Lanczos3);
    surface.draw_image(&resized, dest_x, dest_y);
}

/// Source pixel range `[start, end)` that maps onto destination pixels `[d0, d1)`.
fn source_span(d0: i64, d1: i64, origin: f64, scale: f64, len: u32) -> (u32, u32) {
    let start = ((d0 as f64 - origin) / scale).floor().max(0.0) as u32;
    let start = start.min(len - 1);
    let end = ((d1 as f64 - origin) / scale).ceil().max(0.0) as u32;
    (start, end.clamp(start + 1, len))
}
