#![forbid(unsafe_code)]
//! plant_grid: staggered planting grids for rectangular garden beds.
//!
//! Modules:
//! - geometry: bed rectangle and circular exclusion zones
//! - config: generation parameters and validation
//! - lattice: the centered, staggered lattice of candidate sites
//! - generator: filtering the lattice down to planting positions
//! - events: observing accepted and rejected sites
pub mod config;
pub mod error;
pub mod events;
pub mod generator;
pub mod geometry;
pub mod lattice;

/// Convenient re-exports for common types. Import with `use plant_grid::prelude::*;`.
pub mod prelude {
    pub use crate::config::{GridConfig, MAX_LATTICE_SITES};
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GridEvent, Rejection, VecSink};
    pub use crate::generator::{generate, generate_with_events, PlantingLayout, PlantingPosition};
    pub use crate::geometry::{Bed, ExclusionZone};
    pub use crate::lattice::{LatticeSite, StaggeredLattice};
}
