// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zoom and export controls below the preview.

use crate::models::placement::{MAX_ZOOM, MIN_ZOOM, SLIDER_STEP, ZOOM_STEP};
use crate::models::session::SessionEvent;

/// Result of interacting with the control row.
pub enum ControlAction {
    None,
    Session(SessionEvent),
    Download,
}

/// Display the zoom stepper, slider, fit button and download button.
pub fn show(ui: &mut egui::Ui, zoom: f64, can_export: bool) -> ControlAction {
    let mut action = ControlAction::None;

    ui.horizontal(|ui| {
        ui.label("Zoom");
        ui.label(
            egui::RichText::new(format!("{}%", (zoom * 100.0).round()))
                .monospace()
                .weak(),
        );

        ui.separator();

        if ui.button("−").on_hover_text("Zoom out").clicked() {
            action = ControlAction::Session(SessionEvent::AdjustZoom(-ZOOM_STEP));
        }

        let mut value = zoom;
        let slider = egui::Slider::new(&mut value, MIN_ZOOM..=MAX_ZOOM)
            .step_by(SLIDER_STEP)
            .show_value(false);
        if ui.add(slider).changed() {
            action = ControlAction::Session(SessionEvent::SetZoom(value));
        }

        if ui.button("+").on_hover_text("Zoom in").clicked() {
            action = ControlAction::Session(SessionEvent::AdjustZoom(ZOOM_STEP));
        }

        if ui
            .button("⟲ Fit to frame")
            .on_hover_text("Reset to fit")
            .clicked()
        {
            action = ControlAction::Session(SessionEvent::FitToFrame);
        }

        ui.separator();

        if ui
            .add_enabled(can_export, egui::Button::new("Download PNG"))
            .clicked()
        {
            action = ControlAction::Download;
        }
    });

    action
}
