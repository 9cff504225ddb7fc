use crate::models::Waypoint;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Memoized great-circle distances for one planning invocation.
///
/// Keyed by the unordered id pair. Created fresh per plan and dropped with
/// it; never shared between trips.
#[derive(Debug, Default)]
pub struct DistanceCache {
    distances: RefCell<HashMap<(String, String), f64>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn between(&self, a: &Waypoint, b: &Waypoint) -> f64 {
        if a.id == b.id {
            return 0.0;
        }

        let key = if a.id < b.id {
            (a.id.clone(), b.id.clone())
        } else {
            (b.id.clone(), a.id.clone())
        };

        if let Some(&miles) = self.distances.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return miles;
        }

        self.misses.set(self.misses.get() + 1);
        let miles = a.distance_to(b);
        self.distances.borrow_mut().insert(key, miles);
        miles
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.get(), self.misses.get())
    }
}
