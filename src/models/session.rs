// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing session state.
//!
//! A session pairs the selected template with the uploaded photo and the
//! user's placement of that photo. All mutation goes through the methods
//! here, which also keep track of whether the preview needs re-rendering
//! and which image decodes are still current.

use super::gesture::{GestureController, PanEnd, PointerCapture};
use super::placement::Placement;
use super::template::{Catalog, Template, TemplateId};
use crate::util::geometry::Point;
use anyhow::{anyhow, Result};
use image::RgbaImage;

/// Which image a decode request fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSlot {
    Template,
    Photo,
}

/// Identifies one decode request; stale tickets are rejected on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub slot: LoadSlot,
    pub generation: u64,
}

/// Input events from the preview and the zoom controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerCancel,
    PointerLeave,
    /// Wheel tick; positive is wheel-down.
    Wheel(f64),
    SetZoom(f64),
    AdjustZoom(f64),
    FitToFrame,
}

pub struct Session {
    catalog: Catalog,
    template_id: TemplateId,
    template_image: Option<RgbaImage>,
    photo: Option<RgbaImage>,
    placement: Placement,
    gesture: GestureController,
    template_generation: u64,
    photo_generation: u64,
    dirty: bool,
}

impl Session {
    pub fn new(catalog: Catalog) -> Result<Self> {
        let template_id = catalog
            .initial()
            .map(|t| t.id)
            .ok_or_else(|| anyhow!("catalog has no templates"))?;
        Ok(Self {
            catalog,
            template_id,
            template_image: None,
            photo: None,
            placement: Placement::default(),
            gesture: GestureController::new(),
            template_generation: 0,
            photo_generation: 0,
            dirty: true,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    pub fn template(&self) -> &Template {
        // template_id is only ever set from an id present in the catalog
        self.catalog
            .get(self.template_id)
            .unwrap_or(&self.catalog.templates[0])
    }

    pub fn template_image(&self) -> Option<&RgbaImage> {
        self.template_image.as_ref()
    }

    pub fn photo(&self) -> Option<&RgbaImage> {
        self.photo.as_ref()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// Download is only possible once the template artwork is decoded.
    pub fn can_export(&self) -> bool {
        self.template_image.is_some()
    }

    /// Switch templates. Returns the decode request for the new artwork, or
    /// None if `id` is unknown or already selected.
    pub fn select_template(&mut self, id: TemplateId) -> Option<LoadTicket> {
        if id == self.template_id || self.catalog.get(id).is_none() {
            return None;
        }
        log::info!("Switching template {} -> {}", self.template_id, id);
        self.template_id = id;
        self.template_image = None;
        self.placement.reset();
        self.gesture.cancel();
        Some(self.request_template_load())
    }

    /// Start a new decode of the current template's artwork.
    pub fn request_template_load(&mut self) -> LoadTicket {
        self.template_generation += 1;
        self.dirty = true;
        LoadTicket {
            slot: LoadSlot::Template,
            generation: self.template_generation,
        }
    }

    /// Start a new photo decode; any earlier one still in flight becomes stale.
    pub fn request_photo_load(&mut self) -> LoadTicket {
        self.photo_generation += 1;
        LoadTicket {
            slot: LoadSlot::Photo,
            generation: self.photo_generation,
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        match ticket.slot {
            LoadSlot::Template => ticket.generation == self.template_generation,
            LoadSlot::Photo => ticket.generation == self.photo_generation,
        }
    }

    /// Apply a finished decode. Returns false if the result was stale and discarded.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<RgbaImage, String>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale {:?} decode #{}", ticket.slot, ticket.generation);
            return false;
        }
        match (ticket.slot, result) {
            (LoadSlot::Template, Ok(image)) => {
                log::info!(
                    "Template {} ready ({}x{})",
                    self.template_id,
                    image.width(),
                    image.height()
                );
                self.template_image = Some(image);
            }
            (LoadSlot::Template, Err(e)) => {
                log::warn!("Template {} unavailable: {}", self.template_id, e);
                self.template_image = None;
            }
            (LoadSlot::Photo, Ok(image)) => {
                log::info!("Photo ready ({}x{})", image.width(), image.height());
                self.photo = Some(image);
                self.placement.reset();
            }
            (LoadSlot::Photo, Err(e)) => {
                log::warn!("Photo could not be decoded: {}", e);
                return true;
            }
        }
        self.dirty = true;
        true
    }

    /// Dispatch one input event. Returns true if the placement changed.
    pub fn handle(&mut self, event: SessionEvent, capture: &mut dyn PointerCapture) -> bool {
        let before = self.placement;
        match event {
            SessionEvent::PointerDown(pos) => self.gesture.pointer_down(pos, capture),
            SessionEvent::PointerMove(pos) => {
                self.gesture.pointer_move(pos, &mut self.placement);
            }
            SessionEvent::PointerUp => self.gesture.end_pan(PanEnd::Up, capture),
            SessionEvent::PointerCancel => self.gesture.end_pan(PanEnd::Cancel, capture),
            SessionEvent::PointerLeave => self.gesture.end_pan(PanEnd::Leave, capture),
            SessionEvent::Wheel(delta_y) => {
                self.gesture.wheel(delta_y, &mut self.placement);
            }
            SessionEvent::SetZoom(zoom) => self.placement.set_zoom(zoom),
            SessionEvent::AdjustZoom(delta) => self.placement.adjust_zoom(delta),
            SessionEvent::FitToFrame => self.placement.reset(),
        }
        let changed = self.placement != before;
        self.dirty |= changed;
        changed
    }

    /// Whether the preview must be re-rendered; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gesture::{GestureState, NoCapture};
    use crate::models::placement::ZOOM_STEP;

    fn session() -> Session {
        Session::new(Catalog::builtin()).unwrap()
    }

    fn image(w: u32, h: u32) -> RgbaImage {
        RgbaImage::new(w, h)
    }

    #[test]
    fn test_starts_on_default_template() {
        let s = session();
        assert_eq!(s.template_id(), TemplateId::Attending);
        assert!(!s.can_export());
    }

    #[test]
    fn test_template_swap_resets_placement_and_gesture() {
        let mut s = session();
        s.handle(SessionEvent::SetZoom(2.4), &mut NoCapture);
        s.handle(SessionEvent::PointerDown(Point::new(1.0, 1.0)), &mut NoCapture);
        s.handle(SessionEvent::PointerMove(Point::new(40.0, -3.0)), &mut NoCapture);
        assert!(s.gesture().is_panning());
        assert!(!s.placement().is_default());

        let ticket = s.select_template(TemplateId::Speaking);
        assert!(ticket.is_some());
        assert_eq!(s.template_id(), TemplateId::Speaking);
        assert!(s.placement().is_default());
        assert_eq!(s.gesture().state(), GestureState::Idle);

        // A later move from the old drag must not pan
        assert!(!s.handle(SessionEvent::PointerMove(Point::new(90.0, 90.0)), &mut NoCapture));
    }

    #[test]
    fn test_selecting_same_template_is_noop() {
        let mut s = session();
        s.handle(SessionEvent::SetZoom(2.0), &mut NoCapture);
        assert!(s.select_template(TemplateId::Attending).is_none());
        assert_eq!(s.placement().zoom(), 2.0);
    }

    #[test]
    fn test_photo_swap_resets_placement_but_not_template() {
        let mut s = session();
        s.select_template(TemplateId::Speaking);
        let first = s.request_photo_load();
        assert!(s.complete_load(first, Ok(image(40, 20))));
        s.handle(SessionEvent::AdjustZoom(ZOOM_STEP), &mut NoCapture);
        s.handle(SessionEvent::PointerDown(Point::ZERO), &mut NoCapture);
        s.handle(SessionEvent::PointerMove(Point::new(7.0, 7.0)), &mut NoCapture);

        let second = s.request_photo_load();
        assert!(s.complete_load(second, Ok(image(20, 40))));
        assert!(s.placement().is_default());
        assert_eq!(s.template_id(), TemplateId::Speaking);
        assert_eq!(s.photo().unwrap().dimensions(), (20, 40));
    }

    #[test]
    fn test_stale_template_decode_discarded() {
        let mut s = session();
        let old = s.request_template_load();
        let new = s.select_template(TemplateId::Speaking).unwrap();

        assert!(!s.complete_load(old, Ok(image(980, 980))));
        assert!(s.template_image().is_none());

        assert!(s.complete_load(new, Ok(image(1000, 1000))));
        assert_eq!(s.template_image().unwrap().dimensions(), (1000, 1000));
        assert!(s.can_export());
    }

    #[test]
    fn test_stale_photo_decode_discarded() {
        let mut s = session();
        let old = s.request_photo_load();
        let new = s.request_photo_load();
        assert!(s.complete_load(new, Ok(image(3, 3))));
        assert!(!s.complete_load(old, Ok(image(9, 9))));
        assert_eq!(s.photo().unwrap().dimensions(), (3, 3));
    }

    #[test]
    fn test_failed_template_decode_disables_export() {
        let mut s = session();
        let ticket = s.request_template_load();
        assert!(s.complete_load(ticket, Err("not a png".to_string())));
        assert!(s.template_image().is_none());
        assert!(!s.can_export());
    }

    #[test]
    fn test_failed_photo_decode_keeps_previous_photo() {
        let mut s = session();
        let ok = s.request_photo_load();
        s.complete_load(ok, Ok(image(5, 5)));
        s.handle(SessionEvent::SetZoom(1.5), &mut NoCapture);

        let bad = s.request_photo_load();
        s.complete_load(bad, Err("truncated".to_string()));
        assert_eq!(s.photo().unwrap().dimensions(), (5, 5));
        assert_eq!(s.placement().zoom(), 1.5);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut s = session();
        assert!(s.take_dirty());
        assert!(!s.take_dirty());

        // Zoom out at minimum changes nothing
        assert!(!s.handle(SessionEvent::Wheel(1.0), &mut NoCapture));
        assert!(!s.take_dirty());

        assert!(s.handle(SessionEvent::Wheel(-1.0), &mut NoCapture));
        assert!(s.take_dirty());

        s.handle(SessionEvent::FitToFrame, &mut NoCapture);
        assert!(s.take_dirty());
    }

    #[test]
    fn test_fit_to_frame_while_panning_keeps_drag() {
        let mut s = session();
        s.handle(SessionEvent::PointerDown(Point::ZERO), &mut NoCapture);
        s.handle(SessionEvent::PointerMove(Point::new(10.0, 0.0)), &mut NoCapture);
        s.handle(SessionEvent::FitToFrame, &mut NoCapture);
        assert!(s.gesture().is_panning());
        s.handle(SessionEvent::PointerMove(Point::new(12.0, 0.0)), &mut NoCapture);
        assert!((s.placement().offset().x - 2.0).abs() < 0.0001);
    }
}
