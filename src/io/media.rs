// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image loading (template artwork and user photos).
//!
//! Decoding happens on background threads; finished results are picked up
//! on the UI thread each frame together with the ticket they were issued
//! for, so the session can drop results that are no longer wanted.

use crate::models::session::LoadTicket;
use anyhow::{Context, Result};
use image::{ImageReader, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Extensions offered in the photo picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Decode an image file into RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Where a decode request reads its image from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    File(PathBuf),
}

impl ImageSource {
    fn decode(&self) -> Result<RgbaImage> {
        match self {
            ImageSource::File(path) => load_image(path),
        }
    }
}

/// A finished decode.
pub struct LoadedImage {
    pub ticket: LoadTicket,
    pub result: Result<RgbaImage, String>,
}

/// Runs decodes in the background and hands back results in completion order.
pub struct ImageLoader {
    sender: Sender<LoadedImage>,
    receiver: Receiver<LoadedImage>,
    in_flight: usize,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Start decoding `source` on a background thread.
    pub fn request(&mut self, ticket: LoadTicket, source: ImageSource) {
        let sender = self.sender.clone();
        self.in_flight += 1;

        std::thread::spawn(move || {
            let result = source.decode().map_err(|e| format!("{:#}", e));
            if let Ok(ref img) = result {
                log::debug!(
                    "Decoded {:?} #{} ({}x{})",
                    ticket.slot,
                    ticket.generation,
                    img.width(),
                    img.height()
                );
            }
            // The loader may be gone if the app is shutting down
            let _ = sender.send(LoadedImage { ticket, result });
        });
    }

    /// Collect every decode that has finished since the last call.
    pub fn poll(&mut self) -> Vec<LoadedImage> {
        let finished: Vec<LoadedImage> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(finished.len());
        finished
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}
