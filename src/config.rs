use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Startup configuration. Loaded from an optional JSON file next to the
/// binary; any missing field falls back to its default, so a partial file
/// is fine.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct VizConfig {
    pub grid_size: i32,
    pub grid_opacity: u8,
    pub perspective: bool,
    pub palette: GlyphPalette,
}

/// Glyph colors as hex strings, one per input vector and one per drawable
/// operation result.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GlyphPalette {
    pub vec_a: String,
    pub vec_b: String,
    pub vec_c: String,
    pub sum: String,
    pub difference: String,
    pub cross: String,
    pub vector_triple: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            grid_opacity: 30,
            perspective: true,
            palette: GlyphPalette::default(),
        }
    }
}

impl Default for GlyphPalette {
    fn default() -> Self {
        Self {
            vec_a: "#FF0000".to_owned(),
            vec_b: "#0000FF".to_owned(),
            vec_c: "#FFFF00".to_owned(),
            sum: "#00FF00".to_owned(),
            difference: "#FFA500".to_owned(),
            cross: "#800080".to_owned(),
            vector_triple: "#00FFFF".to_owned(),
        }
    }
}

impl VizConfig {
    /// Read the config file if it exists; otherwise, or on a malformed file,
    /// run with defaults. Never fatal.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => {
                info!(path = %path.display(), "loaded config");
                cfg
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "bad config file, using defaults");
                Self::default()
            }
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))
    }
}

/// Parse a "#RRGGBB" palette entry, falling back when the string is not a
/// valid hex color.
pub fn parse_color(hex: &str, fallback: egui::Color32) -> egui::Color32 {
    egui::Color32::from_hex(hex).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = VizConfig::default();
        assert_eq!(cfg.grid_size, 5);
        assert!(cfg.perspective);
        assert_eq!(cfg.palette.vec_a, "#FF0000");
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: VizConfig = serde_json::from_str(r#"{ "grid_size": 8 }"#).unwrap();
        assert_eq!(cfg.grid_size, 8);
        assert_eq!(cfg.grid_opacity, 30);
        assert_eq!(cfg.palette.cross, "#800080");
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = VizConfig::default();
        let text = serde_json::to_string(&cfg).unwrap();
        let back: VizConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.grid_size, cfg.grid_size);
        assert_eq!(back.palette.vector_triple, cfg.palette.vector_triple);
    }

    #[test]
    fn bad_hex_falls_back() {
        let c = parse_color("not-a-color", egui::Color32::WHITE);
        assert_eq!(c, egui::Color32::WHITE);
        let c = parse_color("#FF0000", egui::Color32::WHITE);
        assert_eq!(c, egui::Color32::from_rgb(255, 0, 0));
    }
}
