//! Human-readable summary of a planting layout.
use std::fmt;

use glam::Vec2;
use plant_grid::prelude::*;

/// Plant count and first planting position of a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub label: String,
    pub count: usize,
    pub first: Vec2,
}

impl Report {
    /// Summarizes `layout`; fails with [`Error::EmptyResult`] when nothing can be planted.
    pub fn from_layout(layout: &PlantingLayout, label: impl Into<String>) -> Result<Self> {
        let first = layout.first()?.position;
        Ok(Self {
            label: label.into(),
            count: layout.len(),
            first,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Number of {} planting spots: {}",
            self.label.to_lowercase(),
            self.count
        )?;
        write!(f, "First plot location: ({:?}, {:?})", self.first.x, self.first.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garlic_bed_report() {
        let layout = generate(&GridConfig::garlic_bed()).unwrap();
        let report = Report::from_layout(&layout, "Garlic").unwrap();
        assert_eq!(report.count, 67);
        assert_eq!(
            report.to_string(),
            "Number of garlic planting spots: 67\nFirst plot location: (2.75, 4.0)"
        );
    }

    #[test]
    fn empty_layout_is_an_error() {
        let config = GridConfig::garlic_bed().with_edge_buffer(18.0);
        let layout = generate(&config).unwrap();
        assert!(matches!(
            Report::from_layout(&layout, "Garlic"),
            Err(Error::EmptyResult)
        ));
    }
}
