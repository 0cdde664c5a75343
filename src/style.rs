use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plot style – key-value settings for the viewer, stored as JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub size: f32,
    pub bold: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            bold: false,
        }
    }
}

impl FontStyle {
    const fn new(size: f32, bold: bool) -> Self {
        Self { size, bold }
    }
}

/// Visual settings of the curve chart and the result text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub title: FontStyle,
    pub x_label: FontStyle,
    pub y_label: FontStyle,
    /// Summary / result text.
    pub text: FontStyle,
    pub line_width: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            title: FontStyle::new(20.0, true),
            x_label: FontStyle::new(14.0, false),
            y_label: FontStyle::new(14.0, false),
            text: FontStyle::new(16.0, true),
            line_width: 1.5,
        }
    }
}

impl PlotStyle {
    /// Parse a style file. Fields missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("serialising plot style")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// StyleStore – the style bound to its settings file
// ---------------------------------------------------------------------------

pub struct StyleStore {
    path: PathBuf,
    pub style: PlotStyle,
}

impl StyleStore {
    /// Load the style at `path`. A missing file is created with defaults; an
    /// unreadable one falls back to defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let style = if path.exists() {
            PlotStyle::from_file(&path).unwrap_or_else(|e| {
                log::warn!("Using default plot style: {e:#}");
                PlotStyle::default()
            })
        } else {
            let style = PlotStyle::default();
            if let Err(e) = style.to_file(&path) {
                log::warn!("Could not write default plot style: {e:#}");
            }
            style
        };
        Self { path, style }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        self.style.to_file(&self.path)
    }

    /// Adopt the style from another file and persist it.
    pub fn import(&mut self, from: &Path) -> Result<()> {
        self.style = PlotStyle::from_file(from)?;
        self.save()
    }

    /// Write a copy of the current style elsewhere.
    pub fn export(&self, to: &Path) -> Result<()> {
        self.style.to_file(to)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.style = PlotStyle::default();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        let store = StyleStore::open(&path);
        assert_eq!(store.style, PlotStyle::default());
        assert!(path.exists());
    }

    #[test]
    fn partial_file_is_merged_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r#"{ "title": { "size": 30.0 }, "line_width": 3.0 }"#).unwrap();
        let store = StyleStore::open(&path);
        assert_eq!(store.style.title.size, 30.0);
        assert!(!store.style.title.bold);
        assert_eq!(store.style.line_width, 3.0);
        assert_eq!(store.style.text, PlotStyle::default().text);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(StyleStore::open(&path).style, PlotStyle::default());
    }

    #[test]
    fn import_export_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = StyleStore::open(dir.path().join("style.json"));
        store.style.line_width = 4.0;

        let exported = dir.path().join("shared/export.json");
        store.export(&exported).unwrap();

        store.reset().unwrap();
        assert_eq!(store.style, PlotStyle::default());

        store.import(&exported).unwrap();
        assert_eq!(store.style.line_width, 4.0);
        assert_eq!(PlotStyle::from_file(store.path()).unwrap().line_width, 4.0);
    }
}
