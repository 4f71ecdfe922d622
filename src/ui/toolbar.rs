// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template selection toolbar.
//!
//! This module provides the tab strip for choosing a badge template and
//! the photo upload button.

use crate::models::template::{Catalog, TemplateId};

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SelectTemplate(TemplateId),
    UploadPhoto,
}

/// Display the toolbar with one tab per template.
pub fn show(ui: &mut egui::Ui, catalog: &Catalog, current: TemplateId) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Template:");

        ui.separator();

        for template in &catalog.templates {
            if ui
                .selectable_label(template.id == current, &template.title)
                .clicked()
                && template.id != current
            {
                action = ToolbarAction::SelectTemplate(template.id);
            }
        }

        ui.separator();

        if ui.button("Upload photo").clicked() {
            action = ToolbarAction::UploadPhoto;
        }
    });

    if let Some(template) = catalog.get(current) {
        if !template.blurb.is_empty() {
            ui.label(egui::RichText::new(&template.blurb).italics().weak());
        }
    }

    action
}
