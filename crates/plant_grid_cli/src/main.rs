//! Planting grid CLI.
//!
//! Computes the staggered planting grid for a bed, renders it to PNG or SVG and prints
//! the number of planting spots and the first position.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use plant_grid::prelude::{generate, ExclusionZone};
use plant_grid_cli::{
    init_tracing, render_to_path, BedSettings, RenderConfig, Report, MAX_DOT_RADIUS_PX,
};
use tracing::debug;

#[derive(Parser)]
#[command(name = "plant-grid")]
#[command(version)]
#[command(about = "Staggered planting grid for a garden bed")]
struct Cli {
    /// JSON settings file; flags override its values
    #[arg(long, env = "PLANT_GRID_CONFIG")]
    config: Option<PathBuf>,

    /// Bed length (x axis)
    #[arg(long)]
    length: Option<f32>,

    /// Bed width (y axis)
    #[arg(long)]
    width: Option<f32>,

    /// Distance between plants in a row
    #[arg(long)]
    spacing: Option<f32>,

    /// Distance between rows (defaults to half the spacing)
    #[arg(long)]
    row_offset: Option<f32>,

    /// Minimum clearance from the bed edge
    #[arg(long)]
    edge_buffer: Option<f32>,

    /// Exclusion circle as "x,y,radius"; repeat for several
    #[arg(long = "exclusion", value_parser = parse_exclusion)]
    exclusions: Vec<ExclusionZone>,

    /// Drop the default exclusion circles
    #[arg(long, conflicts_with = "exclusions")]
    no_exclusions: bool,

    /// Crop name used in captions
    #[arg(long)]
    label: Option<String>,

    /// Output image; ".svg" writes SVG, anything else PNG
    #[arg(short, long, default_value = "planting-layout.png")]
    output: PathBuf,

    /// Image scale in pixels per bed unit
    #[arg(long, default_value = "10", value_parser = parse_scale)]
    scale: f32,

    /// Planting dot radius in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=MAX_DOT_RADIUS_PX as i64))]
    dot_radius: Option<i32>,

    /// Image background as "#rrggbb" or "r,g,b"
    #[arg(long, value_parser = parse_color)]
    background: Option<[u8; 3]>,

    /// Skip rendering
    #[arg(long)]
    no_render: bool,

    /// Print the layout as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn flag_settings(&self) -> BedSettings {
        let exclusions = if self.no_exclusions {
            Some(Vec::new())
        } else if self.exclusions.is_empty() {
            None
        } else {
            Some(self.exclusions.clone())
        };
        BedSettings {
            length: self.length,
            width: self.width,
            plant_spacing: self.spacing,
            row_offset: self.row_offset,
            edge_buffer: self.edge_buffer,
            exclusions,
            label: self.label.clone(),
        }
    }

    fn render_config(&self, label: &str) -> RenderConfig {
        let mut rc = RenderConfig::new(self.scale).with_label(label);
        if let Some(radius) = self.dot_radius {
            rc = rc.with_dot_radius(radius);
        }
        if let Some(background) = self.background {
            rc = rc.with_background(background);
        }
        rc
    }
}

/// Parses "x,y,radius" into an exclusion zone.
fn parse_exclusion(s: &str) -> std::result::Result<ExclusionZone, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, r] => Ok(ExclusionZone::new(Vec2::new(*x, *y), *r)),
        _ => Err(format!("expected x,y,radius but got '{s}'")),
    }
}

fn parse_scale(s: &str) -> std::result::Result<f32, String> {
    let scale: f32 = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid scale '{s}': {e}"))?;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("scale must be finite and > 0, got '{s}'"));
    }
    Ok(scale)
}

/// Parses "#rrggbb" or "r,g,b" into an RGB triple.
fn parse_color(s: &str) -> std::result::Result<[u8; 3], String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #rrggbb but got '{s}'"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid color '{s}': {e}"))
        };
        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }
    let parts: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid color '{s}': {e}"))?;
    match parts.as_slice() {
        [r, g, b] => Ok([*r, *g, *b]),
        _ => Err(format!("expected r,g,b but got '{s}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_settings = match &cli.config {
        Some(path) => BedSettings::from_path(path)?,
        None => BedSettings::default(),
    };
    let settings = file_settings.merged(cli.flag_settings());
    let config = settings.to_config()?;
    debug!("Grid configuration: {:?}", config);

    let layout = generate(&config)?;

    if !cli.no_render {
        let rc = cli.render_config(settings.label());
        render_to_path(&layout, &config, &rc, &cli.output)?;
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&layout).context("serializing layout")?;
        println!("{json}");
    } else {
        let report = Report::from_layout(&layout, settings.label())?;
        println!("{report}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exclusion_accepts_three_numbers() {
        let zone = parse_exclusion("20, 18,10").unwrap();
        assert_eq!(zone, ExclusionZone::new(Vec2::new(20.0, 18.0), 10.0));
    }

    #[test]
    fn parse_exclusion_rejects_malformed_input() {
        assert!(parse_exclusion("20,18").is_err());
        assert!(parse_exclusion("a,b,c").is_err());
        assert!(parse_exclusion("1,2,3,4").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "plant-grid",
            "--spacing",
            "6",
            "--exclusion",
            "10,10,2",
            "--exclusion",
            "30,10,2",
            "--no-render",
        ]);
        let settings = BedSettings::default().merged(cli.flag_settings());
        let config = settings.to_config().unwrap();
        assert_eq!(config.plant_spacing, 6.0);
        assert_eq!(config.row_offset, 3.0);
        assert_eq!(config.exclusions.len(), 2);
        assert!(cli.no_render);
    }

    #[test]
    fn no_exclusions_clears_defaults() {
        let cli = Cli::parse_from(["plant-grid", "--no-exclusions"]);
        let config = BedSettings::default()
            .merged(cli.flag_settings())
            .to_config()
            .unwrap();
        assert!(config.exclusions.is_empty());
    }

    #[test]
    fn scale_must_be_positive_and_finite() {
        assert_eq!(parse_scale("2.5"), Ok(2.5));
        for bad in ["0", "-1", "nan", "inf", "ten"] {
            assert!(parse_scale(bad).is_err(), "{bad}");
        }
        assert!(Cli::try_parse_from(["plant-grid", "--scale", "0"]).is_err());
        assert!(Cli::try_parse_from(["plant-grid", "--scale", "-3"]).is_err());
    }

    #[test]
    fn parse_color_accepts_hex_and_triples() {
        assert_eq!(parse_color("#0a141E"), Ok([10, 20, 30]));
        assert_eq!(parse_color("10, 20,30"), Ok([10, 20, 30]));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,300").is_err());
    }

    #[test]
    fn render_flags_reach_render_config() {
        let cli = Cli::parse_from([
            "plant-grid",
            "--scale",
            "4",
            "--dot-radius",
            "5",
            "--background",
            "#000000",
        ]);
        let rc = cli.render_config("Onion");
        assert_eq!(rc.pixels_per_unit, 4.0);
        assert_eq!(rc.dot_radius_px, 5);
        assert_eq!(rc.background, [0, 0, 0]);
        assert_eq!(rc.label, "Onion");
        assert!(rc.validate().is_ok());

        let defaults = Cli::parse_from(["plant-grid"]).render_config("Garlic");
        assert_eq!(defaults.dot_radius_px, RenderConfig::default().dot_radius_px);
        assert_eq!(defaults.background, RenderConfig::default().background);

        assert!(Cli::try_parse_from(["plant-grid", "--dot-radius", "-1"]).is_err());
        assert!(Cli::try_parse_from(["plant-grid", "--dot-radius", "100000"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
