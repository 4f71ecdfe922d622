// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template catalog deserialization.
//!
//! This module loads a template catalog from YAML or JSON, resolves
//! artwork paths relative to the catalog file, and falls back to the
//! built-in catalog when no usable file is configured.

use crate::models::template::Catalog;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Environment variable naming a catalog file to use instead of the built-in one.
pub const CATALOG_ENV: &str = "BADGE_MAKER_CATALOG";

/// Import a catalog from YAML format.
pub fn import_yaml(path: &Path) -> Result<Catalog> {
    let yaml = std::fs::read_to_string(path)?;
    let data = serde_yaml::from_str(&yaml)?;
    Ok(data)
}

/// Import a catalog from JSON format.
pub fn import_json(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path)?;
    let data = serde_json::from_str(&json)?;
    Ok(data)
}

/// Load and validate a catalog file, picking the format from its extension.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let extension = path.extension().and_then(|s| s.to_str());
    let mut catalog = match extension {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        _ => bail!("Unsupported catalog extension: {:?}", extension),
    }
    .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    if let Some(base) = path.parent() {
        for template in &mut catalog.templates {
            if template.src.is_relative() {
                template.src = base.join(&template.src);
            }
        }
    }

    catalog
        .validate()
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    Ok(catalog)
}

/// Catalog named by `BADGE_MAKER_CATALOG`, or the built-in one.
pub fn catalog_from_env() -> Catalog {
    match std::env::var_os(CATALOG_ENV) {
        Some(path) => {
            let path = Path::new(&path);
            match load_catalog(path) {
                Ok(catalog) => {
                    log::info!(
                        "Loaded {} templates from {}",
                        catalog.templates.len(),
                        path.display()
                    );
                    catalog
                }
                Err(e) => {
                    log::error!("{:#}; using built-in templates", e);
                    Catalog::builtin()
                }
            }
        }
        None => Catalog::builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::template::TemplateId;

    const YAML: &str = r#"
default_template: speaking
templates:
  - id: speaking
    title: I am Speaking at
    src: art/speaking.png
    frame_anchor: { x: 450, y: 330 }
    frame_size: { w: 490, h: 612.5 }
"#;

    #[test]
    fn test_load_yaml_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, YAML).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.default_template, TemplateId::Speaking);
        let template = &catalog.templates[0];
        assert_eq!(template.src, dir.path().join("art/speaking.png"));
        assert!(template.blurb.is_empty());
        assert_eq!(template.frame_size.h, 612.5);
    }

    #[test]
    fn test_load_json_keeps_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let mut catalog = Catalog::builtin();
        let absolute = dir.path().join("abs.png");
        catalog.templates[0].src = absolute.clone();
        std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded.templates[0].src, absolute);
        assert_eq!(loaded.templates[1].src, dir.path().join(&catalog.templates[1].src));
    }

    #[test]
    fn test_invalid_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yml");
        std::fs::write(&path, YAML.replace("w: 490", "w: 900")).unwrap();
        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn test_unknown_template_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, YAML.replace("id: speaking", "id: hosting")).unwrap();
        assert!(load_catalog(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "").unwrap();
        assert!(load_catalog(&path).is_err());
    }
}
