//! Grid configuration: bed size, spacing, edge buffer and exclusion zones.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Bed, ExclusionZone};

/// Upper bound on lattice sites evaluated in one run.
pub const MAX_LATTICE_SITES: usize = 1 << 24;

/// Input parameters for one grid generation run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Bed dimensions.
    pub bed: Bed,
    /// Horizontal distance between neighbouring plants in a row.
    pub plant_spacing: f32,
    /// Vertical distance between rows; odd rows are also shifted right by this amount.
    pub row_offset: f32,
    /// Minimum clearance from the bed boundary.
    pub edge_buffer: f32,
    /// Circles in which nothing may be planted.
    pub exclusions: Vec<ExclusionZone>,
}

impl GridConfig {
    /// Creates a config with `row_offset = plant_spacing / 2`, no edge buffer and no exclusions.
    pub fn new(bed: Bed, plant_spacing: f32) -> Self {
        Self {
            bed,
            plant_spacing,
            row_offset: plant_spacing / 2.0,
            edge_buffer: 0.0,
            exclusions: Vec::new(),
        }
    }

    /// A 72 x 36 in (6 ft x 3 ft) garlic bed with 7 in spacing, a 2.5 in edge buffer and two
    /// 10 in exclusion circles on the bed's center line.
    pub fn garlic_bed() -> Self {
        let bed = Bed::new(72.0, 36.0);
        let center_y = bed.width / 2.0;
        Self::new(bed, 7.0)
            .with_edge_buffer(2.5)
            .with_exclusion(ExclusionZone::new(Vec2::new(20.0, center_y), 10.0))
            .with_exclusion(ExclusionZone::new(Vec2::new(52.0, center_y), 10.0))
    }

    /// Sets the row offset.
    pub fn with_row_offset(mut self, row_offset: f32) -> Self {
        self.row_offset = row_offset;
        self
    }

    /// Sets the edge buffer.
    pub fn with_edge_buffer(mut self, edge_buffer: f32) -> Self {
        self.edge_buffer = edge_buffer;
        self
    }

    /// Appends one exclusion zone.
    pub fn with_exclusion(mut self, zone: ExclusionZone) -> Self {
        self.exclusions.push(zone);
        self
    }

    /// Replaces all exclusion zones.
    pub fn with_exclusions(mut self, zones: impl IntoIterator<Item = ExclusionZone>) -> Self {
        self.exclusions = zones.into_iter().collect();
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        let bed = self.bed;
        if !bed.length.is_finite() || !bed.width.is_finite() {
            return Err(Error::InvalidConfig("bed dimensions must be finite".into()));
        }
        if bed.length <= 0.0 || bed.width <= 0.0 {
            return Err(Error::InvalidConfig(
                "bed length and width must be > 0".into(),
            ));
        }
        if !self.plant_spacing.is_finite() || self.plant_spacing <= 0.0 {
            return Err(Error::InvalidConfig("plant_spacing must be > 0".into()));
        }
        if !self.row_offset.is_finite() || self.row_offset <= 0.0 {
            return Err(Error::InvalidConfig("row_offset must be > 0".into()));
        }
        if !self.edge_buffer.is_finite() || self.edge_buffer < 0.0 {
            return Err(Error::InvalidConfig("edge_buffer must be >= 0".into()));
        }
        for (i, zone) in self.exclusions.iter().enumerate() {
            if !zone.center.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "exclusion zone {i} has a non-finite center"
                )));
            }
            if !zone.radius.is_finite() || zone.radius < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "exclusion zone {i} radius must be >= 0"
                )));
            }
        }

        let (rows, cols) = self.lattice_dimensions();
        match rows.checked_mul(cols) {
            Some(sites) if sites <= MAX_LATTICE_SITES => {}
            _ => {
                return Err(Error::InvalidConfig(format!(
                    "lattice of {rows} x {cols} sites exceeds {MAX_LATTICE_SITES} sites"
                )));
            }
        }

        Ok(())
    }

    /// Number of lattice rows and columns that fit in the buffered interior.
    ///
    /// Either count is zero when the edge buffer leaves no usable span on that axis.
    pub fn lattice_dimensions(&self) -> (usize, usize) {
        let usable_length = self.bed.length - 2.0 * self.edge_buffer;
        let usable_width = self.bed.width - 2.0 * self.edge_buffer;
        (
            fitting_count(usable_width, self.row_offset),
            fitting_count(usable_length, self.plant_spacing),
        )
    }
}

/// `floor(span / step) + 1`, or zero for a negative span.
fn fitting_count(span: f32, step: f32) -> usize {
    if span < 0.0 {
        return 0;
    }
    // Saturating float-to-int cast caps absurd ratios at usize::MAX.
    ((span / step).floor() as usize).saturating_add(1)
}
