// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Badge template data structures.
//!
//! This module defines the closed set of template identifiers, the
//! template record with its baseline frame geometry, and the catalog
//! that the application picks templates from.

use crate::util::geometry::{resolve_frame, PixelRect, Point, Size, BASELINE};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Identifier of a badge template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Speaking,
    Attending,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Speaking => "speaking",
            TemplateId::Attending => "attending",
        }
    }

    /// Suggested file name for an exported badge.
    pub fn export_file_name(&self) -> String {
        format!("{}-badge.png", self.as_str())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A badge template: artwork plus the photo frame cut into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    #[serde(default)]
    pub blurb: String,
    pub src: PathBuf,
    /// Top-left of the photo frame on the 980×980 baseline.
    pub frame_anchor: Point,
    /// Size of the photo frame on the 980×980 baseline.
    pub frame_size: Size,
}

impl Template {
    /// Frame rectangle in native pixels for a raster of the given size.
    pub fn frame_rect(&self, width: u32, height: u32) -> PixelRect {
        resolve_frame(self.frame_anchor, self.frame_size, width, height)
    }

    /// Check that the frame has a positive size and lies inside the baseline canvas.
    pub fn validate(&self) -> Result<()> {
        let Point { x, y } = self.frame_anchor;
        let Size { w, h } = self.frame_size;
        if !(w > 0.0 && h > 0.0) {
            bail!("template '{}' has an empty frame ({} x {})", self.id, w, h);
        }
        if x < 0.0 || y < 0.0 || x + w > BASELINE || y + h > BASELINE {
            bail!(
                "template '{}' frame ({}, {}, {} x {}) exceeds the {}x{} baseline",
                self.id,
                x,
                y,
                w,
                h,
                BASELINE,
                BASELINE
            );
        }
        Ok(())
    }
}

/// Templates the user can choose from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub default_template: TemplateId,
    pub templates: Vec<Template>,
}

impl Catalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        // 450 + 490 + 40 = 980 and 330 + 612.5 + 37.5 = 980
        let anchor = Point::new(450.0, 330.0);
        let size = Size { w: 490.0, h: 612.5 };
        Self {
            default_template: TemplateId::Attending,
            templates: vec![
                Template {
                    id: TemplateId::Speaking,
                    title: "I am Speaking at".to_string(),
                    blurb: "This will generate a Speaking post.".to_string(),
                    src: PathBuf::from("assets/images/speaker-session-container-1.png"),
                    frame_anchor: anchor,
                    frame_size: size,
                },
                Template {
                    id: TemplateId::Attending,
                    title: "Thrilled to be attending".to_string(),
                    blurb: "This will generate an Attending post.".to_string(),
                    src: PathBuf::from("assets/images/speaker-session-container.png"),
                    frame_anchor: anchor,
                    frame_size: size,
                },
            ],
        }
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Template selected at startup.
    pub fn initial(&self) -> Option<&Template> {
        self.get(self.default_template).or_else(|| self.templates.first())
    }

    pub fn validate(&self) -> Result<()> {
        if self.templates.is_empty() {
            bail!("catalog has no templates");
        }
        for (i, template) in self.templates.iter().enumerate() {
            template.validate()?;
            if self.templates[..i].iter().any(|t| t.id == template.id) {
                bail!("template '{}' is defined more than once", template.id);
            }
        }
        if self.get(self.default_template).is_none() {
            bail!("default template '{}' is not in the catalog", self.default_template);
        }
        Ok(())
    }
}
