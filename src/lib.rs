//! Spanning trees and delivery tours over zoned 2D locations.
//!
//! Three routing modes are supported:
//!
//! - [Mode::Mst]: a minimum spanning tree that never links the negative and positive zones directly
//! - [Mode::FastTsp]: a cheapest insertion tour
//! - [Mode::OptTsp]: an optimal tour found by branch and bound

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

pub mod error;
pub mod geometry;
pub mod graph;
pub mod input;
mod math;
pub mod output;

pub use error::{Error, Result};
pub use geometry::{Location, Zone, ZoneSummary};
pub use graph::{mst::SpanningTree, tsp::Tour};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mode {
    /// Minimum spanning tree respecting zone boundaries
    #[value(name = "MST")]
    Mst,
    /// Fast approximate tour
    #[value(name = "FASTTSP")]
    FastTsp,
    /// Optimal tour
    #[value(name = "OPTTSP")]
    OptTsp,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Mst => "MST",
            Mode::FastTsp => "FASTTSP",
            Mode::OptTsp => "OPTTSP",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Solution {
    Tree(SpanningTree),
    Tour(Tour),
}

impl Solution {
    pub fn weight(&self) -> f64 {
        match self {
            Solution::Tree(tree) => tree.weight,
            Solution::Tour(tour) => tour.weight,
        }
    }
}

/// A fixed set of locations, indexed in input order.
#[derive(Debug, Clone)]
pub struct Problem {
    locations: Vec<Location>,
    zones: ZoneSummary,
}

impl Problem {
    pub fn new(locations: Vec<Location>) -> Self {
        let zones = ZoneSummary::from_locations(&locations);
        Self { locations, zones }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn zones(&self) -> &ZoneSummary {
        &self.zones
    }

    pub fn run_mst(&self) -> Result<SpanningTree> {
        if self.locations.is_empty() {
            return Err(Error::DegenerateInput {
                mode: Mode::Mst,
                required: 1,
                found: 0,
            });
        }
        graph::mst::compute_mst(&self.locations, &self.zones)
    }

    pub fn run_fast_tsp(&self) -> Result<Tour> {
        graph::tsp::approximate_tsp_with_insertion(&self.locations)
    }

    pub fn run_opt_tsp(&self) -> Result<Tour> {
        graph::bnb::solve_tsp_exactly(&self.locations)
    }

    pub fn solve(&self, mode: Mode) -> Result<Solution> {
        info!(
            "Running {} over {} locations ({:?})",
            mode,
            self.locations.len(),
            self.zones
        );
        Ok(match mode {
            Mode::Mst => Solution::Tree(self.run_mst()?),
            Mode::FastTsp => Solution::Tour(self.run_fast_tsp()?),
            Mode::OptTsp => Solution::Tour(self.run_opt_tsp()?),
        })
    }
}

impl FromIterator<Location> for Problem {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn problem(points: &[[i32; 2]]) -> Problem {
        points.iter().copied().map(Location::from).collect()
    }

    fn random_problem(rng: &mut StdRng, len: usize) -> Problem {
        (0..len)
            .map(|_| Location::new(rng.gen_range(-100..=100), rng.gen_range(-100..=100)))
            .collect()
    }

    #[test]
    fn test_single_location_tree() {
        let tree = problem(&[[-3, 7]]).run_mst().unwrap();
        assert_eq!(tree.weight, 0.);
        assert_eq!(tree.edges().count(), 0);
    }

    #[test]
    fn test_empty_problem_is_degenerate() {
        for mode in [Mode::Mst, Mode::FastTsp, Mode::OptTsp] {
            assert!(matches!(
                problem(&[]).solve(mode),
                Err(Error::DegenerateInput { found: 0, .. })
            ));
        }
    }

    #[test]
    fn test_single_zone_trees_always_exist() {
        let mut rng = StdRng::seed_from_u64(3);
        for with_border in [false, true] {
            for sign in [-1, 1] {
                let mut points = (0..8)
                    .map(|_| [sign * rng.gen_range(1..=40), sign * rng.gen_range(1..=40)])
                    .collect::<Vec<_>>();
                if with_border {
                    points.push([0, 0]);
                }
                let tree = problem(&points).run_mst().unwrap();
                assert_eq!(tree.edges().count(), points.len() - 1);
            }
        }
    }

    #[test]
    fn test_mixed_zones_without_border_fail() {
        let problem = problem(&[[-1, -2], [-3, -3], [5, 1], [-2, 4]]);
        assert_eq!(problem.zones().border, 0);
        assert!(matches!(problem.run_mst(), Err(Error::InfeasibleTopology)));
        // Tours ignore zones
        assert!(problem.run_fast_tsp().is_ok());
        assert!(problem.run_opt_tsp().is_ok());
    }

    #[test]
    fn test_exact_tour_never_loses_to_insertion() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 3..=9 {
            let problem = random_problem(&mut rng, len);
            let fast = problem.run_fast_tsp().unwrap();
            let exact = problem.run_opt_tsp().unwrap();
            assert!(exact.weight <= fast.weight + 1e-9);
            for order in [&fast.order, &exact.order] {
                let mut sorted = order.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..len).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_solving_twice_gives_identical_output() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = (0..9)
            .map(|_| [rng.gen_range(-20..=20), rng.gen_range(-20..=20)])
            .chain([[0, 0]])
            .collect::<Vec<_>>();
        for mode in [Mode::Mst, Mode::FastTsp, Mode::OptTsp] {
            let first = problem(&points).solve(mode).unwrap();
            let second = problem(&points).solve(mode).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_three_locations_are_already_optimal() {
        let problem = problem(&[[1, 5], [-7, 2], [4, -4]]);
        let fast = problem.solve(Mode::FastTsp).unwrap();
        let exact = problem.solve(Mode::OptTsp).unwrap();
        assert!((fast.weight() - exact.weight()).abs() < 1e-9);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::Mst.to_string(), "MST");
        assert_eq!(Mode::from_str("FASTTSP", false), Ok(Mode::FastTsp));
        assert!(Mode::from_str("opttsp", false).is_err());
        assert_eq!(Mode::from_str("opttsp", true), Ok(Mode::OptTsp));
    }
}
