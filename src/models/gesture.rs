// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pointer and wheel gestures on the preview.
//!
//! Dragging pans the photo, the wheel zooms it. The controller is a two
//! state machine (idle / panning) that mutates a [`Placement`].

use super::placement::{Placement, ZOOM_STEP};
use crate::util::geometry::Point;
use anyhow::Result;

/// Pointer capture provided by the host surface.
///
/// While captured, move and release events keep routing to the controller
/// even after the cursor leaves the preview.
pub trait PointerCapture {
    fn capture(&mut self);
    fn release(&mut self) -> Result<()>;
}

/// Capture that needs no host cooperation.
#[derive(Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self) {}

    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    /// A drag is in progress; `last` is the previous pointer position.
    Panning { last: Point },
}

/// Why a pan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanEnd {
    Up,
    Cancel,
    Leave,
}

#[derive(Debug)]
pub struct GestureController {
    state: GestureState,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, GestureState::Panning { .. })
    }

    /// Start a drag at `pos`.
    pub fn pointer_down(&mut self, pos: Point, capture: &mut dyn PointerCapture) {
        capture.capture();
        self.state = GestureState::Panning { last: pos };
        log::debug!("Pan started at ({:.1}, {:.1})", pos.x, pos.y);
    }

    /// Apply the movement since the last pointer position. Returns true if the placement changed.
    pub fn pointer_move(&mut self, pos: Point, placement: &mut Placement) -> bool {
        let GestureState::Panning { last } = self.state else {
            return false;
        };
        let dx = pos.x - last.x;
        let dy = pos.y - last.y;
        self.state = GestureState::Panning { last: pos };
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        placement.translate(dx, dy);
        true
    }

    /// Finish the drag. A leave only ends a pan that is in progress.
    pub fn end_pan(&mut self, reason: PanEnd, capture: &mut dyn PointerCapture) {
        if reason == PanEnd::Leave && !self.is_panning() {
            return;
        }
        self.state = GestureState::Idle;
        if let Err(e) = capture.release() {
            log::warn!("Ignoring pointer capture release failure: {}", e);
        }
        log::debug!("Pan ended ({:?})", reason);
    }

    /// One discrete wheel tick. Positive `delta_y` is wheel-down and zooms out.
    pub fn wheel(&self, delta_y: f64, placement: &mut Placement) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let before = placement.zoom();
        let delta = if delta_y > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        placement.adjust_zoom(delta);
        placement.zoom() != before
    }

    /// Drop any drag session without touching pointer capture.
    pub fn cancel(&mut self) {
        if self.is_panning() {
            log::debug!("Pan session discarded");
        }
        self.state = GestureState::Idle;
    }
}
