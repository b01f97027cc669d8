//! Grid generation: filter the staggered lattice down to valid planting positions.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::events::{EventSink, GridEvent, Rejection};
use crate::lattice::{LatticeSite, StaggeredLattice};

/// An accepted planting position together with its lattice indices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantingPosition {
    pub row: usize,
    pub col: usize,
    pub position: Vec2,
}

/// Result of a grid generation run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantingLayout {
    /// Accepted positions in row-major order.
    pub positions: Vec<PlantingPosition>,
    /// Lattice rows before filtering.
    pub rows: usize,
    /// Lattice columns before filtering.
    pub cols: usize,
    /// Total lattice sites evaluated.
    pub sites_evaluated: usize,
    /// Sites dropped for being too close to the bed edge.
    pub rejected_by_buffer: usize,
    /// Sites dropped for lying in an exclusion zone.
    pub rejected_by_exclusion: usize,
}

impl PlantingLayout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The first accepted position, or [`Error::EmptyResult`] if nothing was accepted.
    pub fn first(&self) -> Result<&PlantingPosition> {
        self.positions.first().ok_or(Error::EmptyResult)
    }

    /// Accepted positions as plain points.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.positions.iter().map(|p| p.position)
    }
}

/// Generates all planting positions for `config`.
pub fn generate(config: &GridConfig) -> Result<PlantingLayout> {
    generate_with_events(config, &mut ())
}

/// Generates all planting positions for `config`, reporting each decision to `sink`.
pub fn generate_with_events(
    config: &GridConfig,
    sink: &mut dyn EventSink,
) -> Result<PlantingLayout> {
    config.validate()?;

    let lattice = StaggeredLattice::from_config(config);
    debug!(
        "Lattice of {} rows x {} cols starting at ({}, {}).",
        lattice.rows, lattice.cols, lattice.origin.x, lattice.origin.y
    );
    sink.send(GridEvent::LatticeBuilt {
        rows: lattice.rows,
        cols: lattice.cols,
        origin: lattice.origin,
    });

    let (interior_min, interior_max) = config.bed.interior_bounds(config.edge_buffer);
    if interior_min.cmplt(interior_max).all() {
        if let Some(zone) = config
            .exclusions
            .iter()
            .position(|z| z.covers_rect(interior_min, interior_max))
        {
            warn!("Exclusion zone {zone} covers the entire buffered interior.");
        }
    } else {
        warn!(
            "Edge buffer {} leaves no interior in a {} x {} bed.",
            config.edge_buffer, config.bed.length, config.bed.width
        );
    }

    let mut layout = PlantingLayout {
        positions: Vec::with_capacity(lattice.len()),
        rows: lattice.rows,
        cols: lattice.cols,
        ..Default::default()
    };

    for site in lattice.sites() {
        layout.sites_evaluated += 1;
        match classify(config, &site) {
            None => {
                layout.positions.push(PlantingPosition {
                    row: site.row,
                    col: site.col,
                    position: site.position,
                });
                sink.send(GridEvent::SiteAccepted { site });
            }
            Some(reason) => {
                match reason {
                    Rejection::OutsideBuffer => layout.rejected_by_buffer += 1,
                    Rejection::InsideExclusion { .. } => layout.rejected_by_exclusion += 1,
                }
                sink.send(GridEvent::SiteRejected { site, reason });
            }
        }
    }

    sink.send(GridEvent::Finished {
        accepted: layout.len(),
        evaluated: layout.sites_evaluated,
    });

    if layout.is_empty() {
        warn!(
            "No planting positions left out of {} lattice sites.",
            layout.sites_evaluated
        );
    } else {
        info!(
            "Accepted {} of {} sites ({} near the edge, {} in exclusion zones).",
            layout.len(),
            layout.sites_evaluated,
            layout.rejected_by_buffer,
            layout.rejected_by_exclusion
        );
    }

    Ok(layout)
}

/// Returns why `site` must be dropped, or `None` if it is a valid planting position.
fn classify(config: &GridConfig, site: &LatticeSite) -> Option<Rejection> {
    if !config
        .bed
        .interior_contains(site.position, config.edge_buffer)
    {
        return Some(Rejection::OutsideBuffer);
    }
    config
        .exclusions
        .iter()
        .position(|zone| zone.contains(site.position))
        .map(|zone| Rejection::InsideExclusion { zone })
}
