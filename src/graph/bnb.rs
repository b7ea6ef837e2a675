//! Exact TSP by branch and bound over tour permutations.
//!
//! The incumbent starts as the [cheapest insertion tour](super::tsp::approximate_tsp_with_insertion).
//! A prefix of the tour is extended one vertex at a time, and a prefix is abandoned as soon as
//! its cost plus a lower bound on the rest can no longer beat the incumbent. The bound is the
//! spanning tree of the unplaced vertices plus the cheapest links from both ends of the prefix
//! into them: any completion of the prefix is a path through the unplaced vertices joined to
//! both ends, which can never be shorter.

use tracing::{debug, info};

use super::{
    mst::PrimTable,
    tsp::{approximate_tsp_with_insertion, cycle_weight, require_cycle, Tour},
};
use crate::{
    error::Result,
    geometry::{DistanceMatrix, EdgeWeight, Location},
    Mode,
};

/// Counters describing how much of the permutation tree was explored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Prefixes that were bounded
    pub nodes: u64,
    pub pruned: u64,
    /// Complete tours that were evaluated
    pub leaves: u64,
    /// Times a complete tour beat the incumbent
    pub improvements: u64,
}

struct BranchAndBound<'a> {
    distances: &'a DistanceMatrix,
    /// Vertex 0 stays at the front. Positions before the current depth are fixed.
    path: Vec<usize>,
    best_path: Vec<usize>,
    best_cost: f64,
    prim: PrimTable,
    stats: SearchStats,
}

impl<'a> BranchAndBound<'a> {
    fn new(distances: &'a DistanceMatrix, seed: Tour) -> Self {
        Self {
            distances,
            path: seed.order.clone(),
            best_path: seed.order,
            best_cost: seed.weight,
            prim: PrimTable::with_capacity(distances.len()),
            stats: SearchStats::default(),
        }
    }

    /// Extend the fixed prefix `path[..placed]`, whose edges cost `cost`.
    ///
    /// Any swaps made in `path` are reverted before returning.
    fn search(&mut self, placed: usize, cost: f64) {
        if placed == self.path.len() {
            self.stats.leaves += 1;
            let total = cost + self.distances.get(self.path[placed - 1], self.path[0]);
            if total < self.best_cost {
                self.stats.improvements += 1;
                self.best_cost = total;
                self.best_path.copy_from_slice(&self.path);
            }
            return;
        }

        self.stats.nodes += 1;
        if cost + self.remaining_lower_bound(placed) >= self.best_cost {
            self.stats.pruned += 1;
            return;
        }

        for i in placed..self.path.len() {
            self.path.swap(placed, i);
            let edge = self.distances.get(self.path[placed - 1], self.path[placed]);
            self.search(placed + 1, cost + edge);
            self.path.swap(placed, i);
        }
    }

    /// Lower bound on the cost of closing the cycle from the prefix `path[..placed]`.
    fn remaining_lower_bound(&mut self, placed: usize) -> f64 {
        let Self {
            distances,
            path,
            prim,
            ..
        } = self;
        let unplaced = &path[placed..];

        // The matrix is complete, so every unplaced vertex is reachable
        let tree = prim
            .run(unplaced.len(), |from, to| {
                EdgeWeight::Connected(distances.get(unplaced[from], unplaced[to]))
            })
            .unwrap_or_default();

        let cheapest_from = |vertex: usize| {
            unplaced
                .iter()
                .map(|other| distances.get(vertex, *other))
                .fold(f64::INFINITY, f64::min)
        };
        tree + cheapest_from(path[placed - 1]) + cheapest_from(path[0])
    }
}

/// Find an optimal TSP tour.
///
/// Exponential in the worst case; practical up to a few dozen well-spread locations.
pub fn solve_tsp_exactly(locations: &[Location]) -> Result<Tour> {
    require_cycle(Mode::OptTsp, locations)?;

    let distances = DistanceMatrix::new(locations);
    let seed = approximate_tsp_with_insertion(locations)?;
    debug!("Seeding branch and bound with upper bound {}", seed.weight);

    let mut search = BranchAndBound::new(&distances, seed);
    search.search(1, 0.);

    let stats = search.stats;
    info!(
        "Branch and bound visited {} prefixes (pruned {}), evaluated {} tours, improved {} times",
        stats.nodes, stats.pruned, stats.leaves, stats.improvements
    );

    let order = search.best_path;
    let weight = cycle_weight(&order, |from, to| distances.get(from, to));
    Ok(Tour { weight, order })
}
