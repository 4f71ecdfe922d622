// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Badge preview canvas.
//!
//! This module shows the composited badge in a square preview and turns
//! drags and wheel scrolls over it into session events. Pointer positions
//! are converted to native template pixels, so a dragged photo follows
//! the cursor exactly whatever the preview scale.

use crate::models::gesture::PointerCapture;
use crate::models::session::SessionEvent;
use crate::util::geometry::Point;
use anyhow::{bail, Result};

/// Largest edge of the preview, in logical points.
const PREVIEW_MAX: f32 = 620.0;

/// Pointer capture backed by egui's drag tracking.
///
/// egui keeps reporting a drag to the widget it started on even when the
/// cursor leaves it, so capturing only has to be remembered.
#[derive(Debug, Default)]
pub struct DragCapture {
    captured: bool,
}

impl PointerCapture for DragCapture {
    fn capture(&mut self) {
        self.captured = true;
    }

    fn release(&mut self) -> Result<()> {
        if !std::mem::take(&mut self.captured) {
            bail!("pointer was not captured");
        }
        Ok(())
    }
}

/// Display the preview and collect the pointer and wheel events over it.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    native_size: Option<(u32, u32)>,
    panning: bool,
    loading: bool,
) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    let available = ui.available_size();
    let side = available.x.min(available.y).min(PREVIEW_MAX).max(64.0);

    ui.vertical_centered(|ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, egui::Color32::from_rgb(0x2a, 0x0a, 0x5b));

        let image_rect = match (texture, native_size) {
            (Some(texture), Some((w, h))) => {
                let image_rect = fit_rect(rect, w as f32, h as f32);
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
                Some((image_rect, w as f32 / image_rect.width()))
            }
            _ => {
                if loading {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Loading template...",
                        egui::FontId::proportional(16.0),
                        egui::Color32::from_gray(200),
                    );
                }
                None
            }
        };
        painter.rect_stroke(
            rect,
            8.0,
            egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(0x8e, 0x5b, 0xff, 80)),
        );

        // Screen points -> native template pixels
        let to_native = |(image_rect, scale): (egui::Rect, f32), pos: egui::Pos2| -> Point {
            Point::new(
                ((pos.x - image_rect.min.x) * scale) as f64,
                ((pos.y - image_rect.min.y) * scale) as f64,
            )
        };

        // No artwork means no native coordinate space to pan in
        if let Some(mapping) = image_rect {
            if response.drag_started() {
                // egui reports the drag only past its threshold; start from the press itself
                let origin = ui
                    .input(|i| i.pointer.press_origin())
                    .or_else(|| response.interact_pointer_pos());
                if let Some(pos) = origin {
                    events.push(SessionEvent::PointerDown(to_native(mapping, pos)));
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    events.push(SessionEvent::PointerMove(to_native(mapping, pos)));
                }
            }
        }

        let pointer_gone = ui.input(|i| i.events.iter().any(|e| matches!(e, egui::Event::PointerGone)));
        if panning && pointer_gone {
            events.push(SessionEvent::PointerCancel);
        } else if response.drag_stopped() {
            events.push(SessionEvent::PointerUp);
        } else if panning && !response.dragged() && !ui.input(|i| i.pointer.any_down()) {
            // The drag ended somewhere egui did not report back to us
            events.push(SessionEvent::PointerLeave);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                // egui scrolls up with positive y; wheel-down is positive here
                events.push(SessionEvent::Wheel(-scroll as f64));
            }
        }

        if response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    });

    events
}

/// Largest rect with the image's aspect ratio that fits in `outer`, centered.
fn fit_rect(outer: egui::Rect, img_width: f32, img_height: f32) -> egui::Rect {
    let img_aspect = img_width / img_height;
    let available_aspect = outer.width() / outer.height();

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (outer.width(), outer.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        (outer.height() * img_aspect, outer.height())
    };

    egui::Rect::from_center_size(outer.center(), egui::vec2(display_width, display_height))
}
