//! Staggered lattice of candidate planting sites.
//!
//! Rows are `row_offset` apart vertically and sites within a row are `plant_spacing`
//! apart horizontally. Odd rows are shifted right by `row_offset`, which with the
//! default `row_offset = plant_spacing / 2` puts every odd-row site midway between
//! two even-row sites. The lattice is centered in the bed before any filtering.
use glam::Vec2;

use crate::config::GridConfig;

/// A candidate site on the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSite {
    pub row: usize,
    pub col: usize,
    pub position: Vec2,
}

/// Row/column layout derived from a [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggeredLattice {
    /// Number of rows.
    pub rows: usize,
    /// Number of sites per row.
    pub cols: usize,
    /// Position of row 0, column 0.
    pub origin: Vec2,
    /// Horizontal distance between sites in a row.
    pub spacing: f32,
    /// Vertical distance between rows and horizontal shift of odd rows.
    pub row_offset: f32,
}

impl StaggeredLattice {
    /// Builds the lattice for `config`. The config is assumed to be validated.
    pub fn from_config(config: &GridConfig) -> Self {
        let (rows, cols) = config.lattice_dimensions();
        let bed = config.bed;
        let spacing = config.plant_spacing;
        let row_offset = config.row_offset;

        let span_x = cols.saturating_sub(1) as f32 * spacing;
        let span_y = rows.saturating_sub(1) as f32 * row_offset;

        // Two candidate starts: one centers the even rows, the other centers the
        // even rows together with the shifted odd rows. The smaller one is used,
        // which in practice always picks the second.
        let x_start_base = (bed.length - span_x) / 2.0;
        let x_start_offset = (bed.length - (span_x + row_offset)) / 2.0;
        let x_start = x_start_base.min(x_start_offset);
        let y_start = (bed.width - span_y) / 2.0;

        Self {
            rows,
            cols,
            origin: Vec2::new(x_start, y_start),
            spacing,
            row_offset,
        }
    }

    /// Total number of sites.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Horizontal shift applied to `row`.
    #[inline]
    pub fn row_shift(&self, row: usize) -> f32 {
        if row % 2 == 0 {
            0.0
        } else {
            self.row_offset
        }
    }

    /// X coordinate of the first site in `row`.
    #[inline]
    pub fn row_start_x(&self, row: usize) -> f32 {
        self.origin.x + self.row_shift(row)
    }

    /// Position of the site at `(row, col)`.
    ///
    /// Computed from the indices directly, so positions do not drift with the column count.
    #[inline]
    pub fn site(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            self.row_start_x(row) + col as f32 * self.spacing,
            self.origin.y + row as f32 * self.row_offset,
        )
    }

    /// All sites in row-major order.
    pub fn sites(&self) -> impl Iterator<Item = LatticeSite> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| LatticeSite {
                row,
                col,
                position: self.site(row, col),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bed;

    #[test]
    fn garlic_bed_lattice_is_centered() {
        let lattice = StaggeredLattice::from_config(&GridConfig::garlic_bed());
        assert_eq!(lattice.rows, 9);
        assert_eq!(lattice.cols, 10);
        assert_eq!(lattice.origin, Vec2::new(2.75, 4.0));
        assert_eq!(lattice.len(), 90);
        // Even rows end at 2.75 + 63 and odd rows at 6.25 + 63, symmetric about 36.
        assert_eq!(lattice.site(0, 9).x, 65.75);
        assert_eq!(lattice.site(1, 9).x, 69.25);
        assert_eq!(lattice.site(8, 0).y, 32.0);
    }

    #[test]
    fn odd_rows_are_shifted_by_row_offset() {
        let lattice = StaggeredLattice::from_config(&GridConfig::garlic_bed());
        for col in 0..lattice.cols {
            let even = lattice.site(0, col);
            let odd = lattice.site(1, col);
            assert_eq!(odd.x - even.x, lattice.row_offset);
            assert_eq!(odd.y - even.y, lattice.row_offset);
        }
        assert_eq!(lattice.row_start_x(2), lattice.origin.x);
    }

    #[test]
    fn sites_are_row_major() {
        let lattice = StaggeredLattice::from_config(&GridConfig::new(Bed::new(10.0, 10.0), 4.0));
        let order: Vec<(usize, usize)> = lattice.sites().map(|s| (s.row, s.col)).collect();
        assert_eq!(order.len(), lattice.len());
        let mut expected = order.clone();
        expected.sort();
        assert_eq!(order, expected);
        assert_eq!(order.first(), Some(&(0, 0)));
    }

    #[test]
    fn buffer_covering_bed_yields_no_sites() {
        let config = GridConfig::new(Bed::new(10.0, 10.0), 2.0).with_edge_buffer(6.0);
        let lattice = StaggeredLattice::from_config(&config);
        assert!(lattice.is_empty());
        assert_eq!(lattice.sites().count(), 0);
    }

    #[test]
    fn start_prefers_offset_centering() {
        let config = GridConfig::new(Bed::new(10.0, 10.0), 2.0)
            .with_row_offset(2.0)
            .with_edge_buffer(1.0);
        let lattice = StaggeredLattice::from_config(&config);
        assert_eq!((lattice.rows, lattice.cols), (5, 5));
        // Base start would be 1.0; the offset-aware start is 0.0.
        assert_eq!(lattice.origin, Vec2::new(0.0, 1.0));
    }
}
