use bitvec::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    geometry::{EdgeWeight, Location, ZoneSummary},
};

/// A spanning tree rooted at vertex 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanningTree {
    pub weight: f64,
    /// Parent of each vertex, `None` only for the root.
    pub parents: Vec<Option<usize>>,
}

impl SpanningTree {
    /// Tree edges ordered by child vertex, with the smaller index first.
    pub fn edges(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| {
                parent.map(|parent| [child.min(parent), child.max(parent)])
            })
    }
}

/// Working arrays for Prim's algorithm, reusable across runs.
///
/// Vertex selection is a linear scan over the table rather than a heap: the search calls this on
/// small residual vertex sets many times over, where a priority queue doesn't pay for itself.
#[derive(Debug, Default)]
pub struct PrimTable {
    min_edge: Vec<Option<f64>>,
    parent: Vec<Option<usize>>,
    visited: BitVec,
}

impl PrimTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            min_edge: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            visited: BitVec::with_capacity(capacity),
        }
    }

    /// Grow a tree over vertices `0..len` from vertex 0 in O(len^2) time.
    ///
    /// Returns the total weight, or `None` if some vertex could not be reached through connected edges.
    /// Parents of the last run are available from [PrimTable::parents].
    pub fn run<W>(&mut self, len: usize, weight: W) -> Option<f64>
    where
        W: Fn(usize, usize) -> EdgeWeight,
    {
        self.min_edge.clear();
        self.min_edge.resize(len, None);
        self.parent.clear();
        self.parent.resize(len, None);
        self.visited.clear();
        self.visited.resize(len, false);

        if len == 0 {
            return Some(0.);
        }
        self.min_edge[0] = Some(0.);

        let mut total = 0.;
        for _ in 0..len {
            // Closest unvisited vertex, first index on ties
            let mut closest: Option<(usize, f64)> = None;
            for (vertex, min_edge) in self.min_edge.iter().enumerate() {
                if self.visited[vertex] {
                    continue;
                }
                if let Some(min_edge) = *min_edge {
                    if closest.map_or(true, |(_, best)| min_edge < best) {
                        closest = Some((vertex, min_edge));
                    }
                }
            }
            let (current, _) = closest?;
            self.visited.set(current, true);

            for other in 0..len {
                if self.visited[other] {
                    continue;
                }
                let Some(distance) = weight(current, other).connected() else {
                    continue;
                };
                match self.min_edge[other] {
                    Some(known) if distance >= known => {}
                    known => {
                        if let Some(known) = known {
                            total -= known;
                        }
                        total += distance;
                        self.min_edge[other] = Some(distance);
                        self.parent[other] = Some(current);
                    }
                }
            }
        }
        Some(total)
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parent
    }
}

/// Compute the minimum spanning tree of all locations under the zone adjacency rule.
pub fn compute_mst(locations: &[Location], zones: &ZoneSummary) -> Result<SpanningTree> {
    if !zones.spanning_tree_possible() {
        return Err(Error::InfeasibleTopology);
    }

    let mut table = PrimTable::with_capacity(locations.len());
    let weight = table
        .run(locations.len(), |from, to| {
            locations[from].restricted_distance(&locations[to])
        })
        .ok_or(Error::InfeasibleTopology)?;
    debug!("Spanning tree over {} locations weighs {}", locations.len(), weight);

    Ok(SpanningTree {
        weight,
        parents: table.parents().to_vec(),
    })
}
