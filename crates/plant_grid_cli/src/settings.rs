//! Layered bed settings: JSON file values over built-in defaults, flags over both.
use std::path::Path;

use anyhow::Context;
use plant_grid::prelude::*;
use serde::Deserialize;

/// Optional overrides for a [`GridConfig`], as read from a settings file or the command line.
///
/// Unset fields fall back to [`GridConfig::garlic_bed`]. When only `plant_spacing` is
/// given, `row_offset` follows it as `plant_spacing / 2`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BedSettings {
    pub length: Option<f32>,
    pub width: Option<f32>,
    pub plant_spacing: Option<f32>,
    pub row_offset: Option<f32>,
    pub edge_buffer: Option<f32>,
    pub exclusions: Option<Vec<ExclusionZone>>,
    pub label: Option<String>,
}

impl BedSettings {
    /// Reads settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Layers `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merged(self, overrides: BedSettings) -> BedSettings {
        BedSettings {
            length: overrides.length.or(self.length),
            width: overrides.width.or(self.width),
            plant_spacing: overrides.plant_spacing.or(self.plant_spacing),
            row_offset: overrides.row_offset.or(self.row_offset),
            edge_buffer: overrides.edge_buffer.or(self.edge_buffer),
            exclusions: overrides.exclusions.or(self.exclusions),
            label: overrides.label.or(self.label),
        }
    }

    /// Crop label for captions and the report.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("Garlic")
    }

    /// Builds and validates the grid configuration.
    pub fn to_config(&self) -> Result<GridConfig> {
        let base = GridConfig::garlic_bed();
        let bed = Bed::new(
            self.length.unwrap_or(base.bed.length),
            self.width.unwrap_or(base.bed.width),
        );
        let spacing = self.plant_spacing.unwrap_or(base.plant_spacing);
        let config = GridConfig::new(bed, spacing)
            .with_row_offset(self.row_offset.unwrap_or(spacing / 2.0))
            .with_edge_buffer(self.edge_buffer.unwrap_or(base.edge_buffer))
            .with_exclusions(self.exclusions.clone().unwrap_or(base.exclusions));
        config.validate()?;
        Ok(config)
    }
}
