//! Event types and sinks for observing grid generation.
//!
//! [`crate::generator::generate_with_events`] reports every lattice site it accepts or
//! rejects through an [`EventSink`], which makes it possible to explain why a bed ends
//! up with fewer plants than the lattice holds.
use glam::Vec2;

use crate::lattice::LatticeSite;

/// Reason a lattice site was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The site is on or outside the buffered interior of the bed.
    OutsideBuffer,
    /// The site is inside or on the boundary of the exclusion zone with this index.
    InsideExclusion { zone: usize },
}

/// Describes events emitted while generating a planting grid.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// Emitted once the lattice dimensions are known.
    LatticeBuilt {
        rows: usize,
        cols: usize,
        /// Position of the first site of the first row.
        origin: Vec2,
    },

    /// Emitted for each accepted site.
    SiteAccepted { site: LatticeSite },

    /// Emitted for each rejected site.
    SiteRejected {
        site: LatticeSite,
        reason: Rejection,
    },

    /// Emitted after every site was evaluated.
    Finished { accepted: usize, evaluated: usize },
}

/// A generic event sink that accepts [`GridEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GridEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GridEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GridEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GridEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GridEvent),
{
    #[inline]
    fn send(&mut self, event: GridEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<GridEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GridEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rejection reasons in the order they were reported.
    pub fn rejections(&self) -> impl Iterator<Item = Rejection> + '_ {
        self.events.iter().filter_map(|e| match e {
            GridEvent::SiteRejected { reason, .. } => Some(*reason),
            _ => None,
        })
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GridEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> LatticeSite {
        LatticeSite {
            row: 0,
            col: 1,
            position: Vec2::new(1.0, 2.0),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(GridEvent::SiteAccepted { site: site() });
        sink.send(GridEvent::SiteRejected {
            site: site(),
            reason: Rejection::InsideExclusion { zone: 1 },
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.rejections().collect::<Vec<_>>(),
            vec![Rejection::InsideExclusion { zone: 1 }]
        );
        assert_eq!(sink.into_inner().len(), 2);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(GridEvent::Finished {
            accepted: 0,
            evaluated: 0,
        });
        sink.send(GridEvent::Finished {
            accepted: 0,
            evaluated: 0,
        });
        drop(sink);
        assert_eq!(count, 2);
    }
}
