//! Viewport intersection tracking
//!
//! Deferred image loading needs to know when a widget's screen region
//! first overlaps the visible viewport. Regions register here with a
//! visibility threshold; each [`process`] pass compares every region
//! against the current viewport and reports only the transitions, so a
//! region sitting still inside the viewport is announced exactly once.
//!
//! [`process`]: ViewportObserver::process

use std::collections::BTreeMap;

use crate::layout::Bounds;

/// Ticket for one observed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationId(u64);

/// A visibility transition reported by [`ViewportObserver::process`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub id: ObservationId,
    /// Whether the region now meets its threshold
    pub is_intersecting: bool,
    /// Visible fraction of the region, 0.0 to 1.0
    pub ratio: f32,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    region: Bounds,
    threshold: f32,
    was_intersecting: bool,
}

/// Tracks which observed regions overlap the viewport
///
/// Regions iterate in id order, so transition reports are deterministic.
#[derive(Debug, Default)]
pub struct ViewportObserver {
    next_id: u64,
    observations: BTreeMap<u64, Observation>,
}

impl ViewportObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing a region
    ///
    /// `threshold` is the visible fraction required to count as
    /// intersecting. At 0.0 any overlap counts.
    pub fn observe(&mut self, region: Bounds, threshold: f32) -> ObservationId {
        let id = self.next_id;
        self.next_id += 1;
        self.observations.insert(
            id,
            Observation {
                region,
                threshold: threshold.clamp(0.0, 1.0),
                was_intersecting: false,
            },
        );
        log::debug!(
            "Observing region {:.0}x{:.0} at ({:.0}, {:.0}) as #{}",
            region.width,
            region.height,
            region.x,
            region.y,
            id
        );
        ObservationId(id)
    }

    /// Move an observed region, keeping its transition state
    pub fn update_region(&mut self, id: ObservationId, region: Bounds) {
        if let Some(observation) = self.observations.get_mut(&id.0) {
            observation.region = region;
        }
    }

    /// Stop observing, returning whether the id was known
    pub fn unobserve(&mut self, id: ObservationId) -> bool {
        self.observations.remove(&id.0).is_some()
    }

    /// Whether this id is still registered
    pub fn is_observed(&self, id: ObservationId) -> bool {
        self.observations.contains_key(&id.0)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Compare all regions against `viewport` and report transitions
    ///
    /// A region appears in the output only when its intersecting state
    /// changed since the previous pass. Regions visible on the very
    /// first pass therefore report immediately.
    pub fn process(&mut self, viewport: Bounds) -> Vec<Intersection> {
        let mut transitions = Vec::new();

        for (&id, observation) in &mut self.observations {
            let area = observation.region.area();
            let visible = observation.region.intersect(&viewport).area();

            let (intersecting, ratio) = if area == 0.0 {
                // Degenerate regions count when their origin is inside
                let inside = viewport.contains(observation.region.x, observation.region.y);
                (inside, if inside { 1.0 } else { 0.0 })
            } else {
                let ratio = visible / area;
                let hit = if observation.threshold <= 0.0 {
                    visible > 0.0
                } else {
                    ratio >= observation.threshold
                };
                (hit, ratio)
            };

            if intersecting != observation.was_intersecting {
                observation.was_intersecting = intersecting;
                transitions.push(Intersection {
                    id: ObservationId(id),
                    is_intersecting: intersecting,
                    ratio,
                });
            }
        }

        transitions
    }
}
