// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Badge Maker
//!
//! A desktop application for placing a personal photo inside the frame of
//! an event badge template and exporting the result as a PNG.

mod app;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::BadgeApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let catalog = io::serialization::catalog_from_env();
    let app = BadgeApp::new(catalog)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([720.0, 600.0])
            .with_title("Badge Maker"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Badge Maker",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
