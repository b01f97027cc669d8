//! Rendering of planting layouts to PNG and SVG.
//!
//! The scene matches a plot of the bed in bed units with the y axis pointing up: the bed
//! outline, the buffered interior as a dashed rectangle, exclusion zones as circle
//! outlines and every planting position as a filled dot.
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context};
use glam::Vec2;
use image::{ImageFormat, Rgb, RgbImage};
use plant_grid::prelude::*;
use tracing::info;

/// Largest accepted image width or height in pixels.
pub const MAX_IMAGE_SIDE_PX: u32 = 16_384;
/// Largest accepted image area in pixels.
pub const MAX_IMAGE_PIXELS: u64 = 1 << 26;
/// Largest accepted planting dot radius in pixels.
pub const MAX_DOT_RADIUS_PX: i32 = 256;

/// Visual settings shared by the PNG and SVG renderers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output pixels per bed unit.
    pub pixels_per_unit: f32,
    /// Blank space left, right and below the bed, in bed units.
    pub margin: f32,
    /// Blank space above the bed for the caption, in bed units.
    pub top_margin: f32,
    /// Crop name used in captions, e.g. "Garlic".
    pub label: String,
    pub background: [u8; 3],
    pub bed_color: [u8; 3],
    pub buffer_color: [u8; 3],
    pub exclusion_color: [u8; 3],
    pub plant_color: [u8; 3],
    /// Radius of a planting dot in pixels.
    pub dot_radius_px: i32,
    /// Length of dashes and gaps of the buffer outline in pixels.
    pub dash_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 10.0,
            margin: 1.0,
            top_margin: 3.0,
            label: "Garlic".into(),
            background: [255, 255, 255],
            bed_color: [0, 0, 0],
            buffer_color: [0, 0, 255],
            exclusion_color: [255, 0, 0],
            plant_color: [0, 128, 0],
            dot_radius_px: 3,
            dash_px: 6,
        }
    }
}

impl RenderConfig {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_dot_radius(mut self, dot_radius_px: i32) -> Self {
        self.dot_radius_px = dot_radius_px;
        self
    }

    /// Checks scale, margins and dot radius.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            bail!(
                "pixels per unit must be finite and > 0, got {}",
                self.pixels_per_unit
            );
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            bail!("margin must be finite and >= 0, got {}", self.margin);
        }
        if !self.top_margin.is_finite() || self.top_margin < 0.0 {
            bail!("top margin must be finite and >= 0, got {}", self.top_margin);
        }
        if !(0..=MAX_DOT_RADIUS_PX).contains(&self.dot_radius_px) {
            bail!(
                "dot radius must be within 0..={MAX_DOT_RADIUS_PX} px, got {}",
                self.dot_radius_px
            );
        }
        Ok(())
    }

    /// Caption placed above the bed.
    pub fn title(&self, layout: &PlantingLayout) -> String {
        format!("{} Planting Layout ({} plants)", self.label, layout.len())
    }

    /// Annotation placed just above the bed's top edge.
    pub fn spacing_note(&self, config: &GridConfig) -> String {
        format!("{} Spacing: {:?} inches", self.label, config.plant_spacing)
    }
}

/// Maps bed coordinates to image pixels.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    scale: f32,
    margin: f32,
    top: f32,
    size: (u32, u32),
}

impl Viewport {
    /// Fails when the settings are invalid or the image would exceed the size limits.
    fn new(bed: Bed, rc: &RenderConfig) -> anyhow::Result<Self> {
        rc.validate()?;
        if !bed.length.is_finite() || !bed.width.is_finite() {
            bail!("cannot render a {} x {} bed", bed.length, bed.width);
        }
        let scale = rc.pixels_per_unit;
        let w = ((bed.length + 2.0 * rc.margin) * scale).ceil().max(1.0);
        let h = ((bed.width + rc.margin + rc.top_margin) * scale)
            .ceil()
            .max(1.0);
        let max_side = MAX_IMAGE_SIDE_PX as f32;
        if !(w <= max_side && h <= max_side) {
            bail!(
                "a {} x {} bed at {scale} px per unit needs a {w} x {h} px image, \
                 over the {MAX_IMAGE_SIDE_PX} px limit",
                bed.length,
                bed.width
            );
        }
        let (w, h) = (w as u32, h as u32);
        if u64::from(w) * u64::from(h) > MAX_IMAGE_PIXELS {
            bail!("a {w} x {h} px image exceeds {MAX_IMAGE_PIXELS} pixels");
        }
        Ok(Self {
            scale,
            margin: rc.margin,
            top: bed.width + rc.top_margin,
            size: (w, h),
        })
    }

    fn to_px(self, p: Vec2) -> Vec2 {
        Vec2::new((p.x + self.margin) * self.scale, (self.top - p.y) * self.scale)
    }

    fn to_px_i(self, p: Vec2) -> (i64, i64) {
        let q = self.to_px(p).round();
        (q.x as i64, q.y as i64)
    }
}

/// Renders `layout` into an in-memory RGB image.
pub fn render_layout_image(
    layout: &PlantingLayout,
    config: &GridConfig,
    rc: &RenderConfig,
) -> anyhow::Result<RgbImage> {
    let view = Viewport::new(config.bed, rc)?;
    let mut img = RgbImage::from_pixel(view.size.0, view.size.1, Rgb(rc.background));

    let (bed_min, bed_max) = (Vec2::ZERO, config.bed.extent());
    draw_rect(&mut img, view, bed_min, bed_max, Rgb(rc.bed_color), None);

    let (inner_min, inner_max) = config.bed.interior_bounds(config.edge_buffer);
    if inner_min.x < inner_max.x && inner_min.y < inner_max.y {
        draw_rect(
            &mut img,
            view,
            inner_min,
            inner_max,
            Rgb(rc.buffer_color),
            Some(rc.dash_px.max(1)),
        );
    }

    for zone in &config.exclusions {
        let (cx, cy) = view.to_px_i(zone.center);
        let r = (zone.radius * view.scale).round() as i64;
        draw_circle(&mut img, cx, cy, r, Rgb(rc.exclusion_color));
    }

    for p in layout.points() {
        let (cx, cy) = view.to_px_i(p);
        fill_disk(&mut img, cx, cy, rc.dot_radius_px as i64, Rgb(rc.plant_color));
    }

    Ok(img)
}

/// Renders `layout` and writes it as a PNG file.
pub fn render_layout_to_png(
    layout: &PlantingLayout,
    config: &GridConfig,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let img = render_layout_image(layout, config, rc)?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing PNG to {}", path.display()))?;
    info!(
        "Wrote {}x{} PNG to {}.",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

/// Renders `layout` as a complete SVG document, including the title and spacing caption.
///
/// Fails under the same size limits as the PNG renderer.
pub fn render_layout_svg(
    layout: &PlantingLayout,
    config: &GridConfig,
    rc: &RenderConfig,
) -> anyhow::Result<String> {
    let view = Viewport::new(config.bed, rc)?;
    let (w, h) = view.size;
    let mut svg = String::with_capacity(256 + layout.len() * 64);

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        hex(rc.background)
    );

    let top_left = view.to_px(Vec2::new(0.0, config.bed.width));
    let _ = writeln!(
        svg,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}"/>"#,
        top_left.x,
        top_left.y,
        config.bed.length * view.scale,
        config.bed.width * view.scale,
        hex(rc.bed_color)
    );

    let (inner_min, inner_max) = config.bed.interior_bounds(config.edge_buffer);
    if inner_min.x < inner_max.x && inner_min.y < inner_max.y {
        let corner = view.to_px(Vec2::new(inner_min.x, inner_max.y));
        let size = (inner_max - inner_min) * view.scale;
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-dasharray="{d},{d}"/>"#,
            corner.x,
            corner.y,
            size.x,
            size.y,
            hex(rc.buffer_color),
            d = rc.dash_px
        );
    }

    for zone in &config.exclusions {
        let c = view.to_px(zone.center);
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}"/>"#,
            c.x,
            c.y,
            zone.radius * view.scale,
            hex(rc.exclusion_color)
        );
    }

    for p in layout.points() {
        let c = view.to_px(p);
        let _ = writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
            c.x,
            c.y,
            rc.dot_radius_px,
            hex(rc.plant_color)
        );
    }

    let note = view.to_px(Vec2::new(5.0, config.bed.width + 0.5));
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="12" font-family="sans-serif">{}</text>"#,
        note.x,
        note.y,
        escape_xml(&rc.spacing_note(config))
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="16" font-size="14" font-weight="bold" font-family="sans-serif" text-anchor="middle">{}</text>"#,
        w as f32 / 2.0,
        escape_xml(&rc.title(layout))
    );

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Writes an SVG when `path` ends in `.svg`, a PNG otherwise.
pub fn render_to_path(
    layout: &PlantingLayout,
    config: &GridConfig,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let svg = render_layout_svg(layout, config, rc)?;
        std::fs::write(path, svg)
            .with_context(|| format!("writing SVG to {}", path.display()))?;
        info!("Wrote SVG to {}.", path.display());
        Ok(())
    } else {
        render_layout_to_png(layout, config, rc, path)
    }
}

fn hex(c: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[inline]
fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u64) < img.width() as u64 && (y as u64) < img.height() as u64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line; with `dash`, alternates `dash` drawn and `dash` skipped pixels.
fn draw_line(
    img: &mut RgbImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    color: Rgb<u8>,
    dash: Option<u32>,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    let mut step: u64 = 0;
    loop {
        let visible = dash.is_none_or(|d| (step / d as u64) % 2 == 0);
        if visible {
            put(img, x, y, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1;
    }
}

fn draw_rect(
    img: &mut RgbImage,
    view: Viewport,
    min: Vec2,
    max: Vec2,
    color: Rgb<u8>,
    dash: Option<u32>,
) {
    let corners = [
        view.to_px_i(Vec2::new(min.x, min.y)),
        view.to_px_i(Vec2::new(max.x, min.y)),
        view.to_px_i(Vec2::new(max.x, max.y)),
        view.to_px_i(Vec2::new(min.x, max.y)),
    ];
    for i in 0..4 {
        draw_line(img, corners[i], corners[(i + 1) % 4], color, dash);
    }
}

/// Circle outline, scanned per image column and row so huge radii stay cheap.
fn draw_circle(img: &mut RgbImage, cx: i64, cy: i64, r: i64, color: Rgb<u8>) {
    if r <= 0 {
        put(img, cx, cy, color);
        return;
    }
    let (cxf, cyf, rf) = (cx as f64, cy as f64, r as f64);
    for x in 0..img.width() as i64 {
        let dx = x as f64 - cxf;
        if dx.abs() <= rf {
            let dy = (rf * rf - dx * dx).sqrt();
            put(img, x, (cyf + dy).round() as i64, color);
            put(img, x, (cyf - dy).round() as i64, color);
        }
    }
    for y in 0..img.height() as i64 {
        let dy = y as f64 - cyf;
        if dy.abs() <= rf {
            let dx = (rf * rf - dy * dy).sqrt();
            put(img, (cxf + dx).round() as i64, y, color);
            put(img, (cxf - dx).round() as i64, y, color);
        }
    }
}

fn fill_disk(img: &mut RgbImage, cx: i64, cy: i64, r: i64, color: Rgb<u8>) {
    let r = r.max(0);
    // Only rows and columns inside the image.
    let (w, h) = (img.width() as i64, img.height() as i64);
    let (y_lo, y_hi) = ((-r).max(cy.saturating_neg()), r.min((h - 1).saturating_sub(cy)));
    let (x_lo, x_hi) = ((-r).max(cx.saturating_neg()), r.min((w - 1).saturating_sub(cx)));
    for dy in y_lo..=y_hi {
        for dx in x_lo..=x_hi {
            if dx * dx + dy * dy <= r * r {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}
