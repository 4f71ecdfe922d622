// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the editing session, the compositor and
//! the background image loader, routes UI actions into the session and
//! re-renders the preview whenever the session reports a change.

use crate::io::export;
use crate::io::media::{ImageLoader, ImageSource, IMAGE_EXTENSIONS};
use crate::models::placement::ZOOM_STEP;
use crate::models::session::{LoadTicket, Session, SessionEvent};
use crate::models::template::{Catalog, TemplateId};
use crate::render::compositor::Compositor;
use crate::ui::canvas::{self, DragCapture};
use crate::ui::controls::{self, ControlAction};
use crate::ui::toolbar::{self, ToolbarAction};
use anyhow::Result;

/// Main application state.
pub struct BadgeApp {
    /// Template, photo and placement being edited
    session: Session,

    /// Renders the badge at native template size
    compositor: Compositor,

    /// Background decoder for template artwork and photos
    loader: ImageLoader,

    /// Pointer capture for drags on the preview
    capture: DragCapture,

    /// Preview texture, re-uploaded after each render
    preview: Option<egui::TextureHandle>,

    /// Last status message shown in the bottom bar
    status: Option<String>,
}

impl BadgeApp {
    /// Create a new application instance and start loading the initial template.
    pub fn new(catalog: Catalog) -> Result<Self> {
        let mut app = Self {
            session: Session::new(catalog)?,
            compositor: Compositor::new(),
            loader: ImageLoader::new(),
            capture: DragCapture::default(),
            preview: None,
            status: None,
        };
        let ticket = app.session.request_template_load();
        app.load_template_image(ticket);
        Ok(app)
    }

    fn load_template_image(&mut self, ticket: LoadTicket) {
        let src = self.session.template().src.clone();
        log::info!("Loading template artwork {}", src.display());
        self.loader.request(ticket, ImageSource::File(src));
    }

    /// Ask for a photo with the native file picker and start decoding it.
    fn upload_photo(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            log::info!("Loading photo {}", path.display());
            let ticket = self.session.request_photo_load();
            self.loader.request(ticket, ImageSource::File(path));
        }
    }

    /// Save the rendered badge as PNG.
    fn download(&mut self) {
        if !self.session.can_export() {
            return;
        }
        let Some(surface) = self.compositor.surface() else {
            return;
        };
        let file_name = self.session.template_id().export_file_name();
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(&file_name)
            .save_file()
        else {
            return;
        };

        match export::save_png(surface.image(), &path) {
            Ok(()) => {
                log::info!("Exported badge to {}", path.display());
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export badge: {:#}", e);
                self.status = Some("Export failed".to_string());
            }
        }
    }

    fn select_template(&mut self, id: TemplateId) {
        if let Some(ticket) = self.session.select_template(id) {
            self.load_template_image(ticket);
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        self.session.handle(event, &mut self.capture);
    }

    /// Re-run the compositor if anything changed and refresh the preview texture.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if !self.session.take_dirty() {
            return;
        }
        if !self.compositor.render_session(&self.session) {
            // Nothing to show until the template artwork arrives
            self.preview = None;
            return;
        }
        let Some(surface) = self.compositor.surface() else {
            return;
        };

        let image = surface.image();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        match self.preview {
            Some(ref mut texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.preview =
                    Some(ctx.load_texture("badge_preview", color_image, egui::TextureOptions::LINEAR));
            }
        }
        ctx.request_repaint();
    }
}

impl eframe::App for BadgeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        for loaded in self.loader.poll() {
            self.session.complete_load(loaded.ticket, loaded.result);
        }

        // Keep polling while decodes are running
        if self.loader.is_busy() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload Photo...").clicked() {
                        self.upload_photo();
                        ui.close_menu();
                    }
                    let can_export = self.session.can_export();
                    if ui
                        .add_enabled(can_export, egui::Button::new("Download PNG..."))
                        .clicked()
                    {
                        self.download();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In (+)").clicked() {
                        self.dispatch(SessionEvent::AdjustZoom(ZOOM_STEP));
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out (-)").clicked() {
                        self.dispatch(SessionEvent::AdjustZoom(-ZOOM_STEP));
                        ui.close_menu();
                    }
                    if ui.button("Fit to Frame (0)").clicked() {
                        self.dispatch(SessionEvent::FitToFrame);
                        ui.close_menu();
                    }
                });
            });
        });

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.heading("Badge Maker");
                ui.label("Upload your photo, then adjust size and position to fit the frame.");
                ui.separator();
                toolbar::show(ui, self.session.catalog(), self.session.template_id())
            })
            .inner;

        match toolbar_action {
            ToolbarAction::SelectTemplate(id) => self.select_template(id),
            ToolbarAction::UploadPhoto => self.upload_photo(),
            ToolbarAction::None => {}
        }

        // Zoom controls and status (bottom)
        let control_action = egui::TopBottomPanel::bottom("controls")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let action = controls::show(
                    ui,
                    self.session.placement().zoom(),
                    self.session.can_export(),
                );
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(format!("Template: {}", self.session.template().title));
                    ui.separator();
                    if self.session.photo().is_some() {
                        ui.label("Drag inside the preview to move, scroll to resize");
                    } else {
                        ui.label("No photo loaded");
                    }
                    if let Some(ref status) = self.status {
                        ui.separator();
                        ui.label(status);
                    }
                });
                action
            })
            .inner;

        match control_action {
            ControlAction::Session(event) => self.dispatch(event),
            ControlAction::Download => self.download(),
            ControlAction::None => {}
        }

        // Keyboard shortcuts, unless a text field is focused
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)) {
                self.dispatch(SessionEvent::AdjustZoom(ZOOM_STEP));
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Minus)) {
                self.dispatch(SessionEvent::AdjustZoom(-ZOOM_STEP));
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Num0)) {
                self.dispatch(SessionEvent::FitToFrame);
            }
        }

        // Preview canvas (center)
        let native_size = self.session.template_image().map(|img| img.dimensions());
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                canvas::show(
                    ui,
                    self.preview.as_ref(),
                    native_size,
                    self.session.gesture().is_panning(),
                    self.loader.is_busy(),
                )
            })
            .inner;

        for event in events {
            self.dispatch(event);
        }

        self.refresh_preview(ctx);
    }
}
