use serde::Serialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    geometry::{insertion_delta, Location},
    kbn_summation, Mode,
};

/// A closed tour: the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub weight: f64,
    pub order: Vec<usize>,
}

/// Length of the cycle through `order`, including the closing edge.
pub fn cycle_weight<D>(order: &[usize], distance: D) -> f64
where
    D: Fn(usize, usize) -> f64,
{
    kbn_summation! {
        for (i, from) in order.iter().enumerate() => {
            'loop: {
                let to = order[(i + 1) % order.len()];
            }
            weight += distance(*from, to);
        }
    }
    weight
}

pub(crate) fn require_cycle(mode: Mode, locations: &[Location]) -> Result<()> {
    if locations.len() < 3 {
        return Err(Error::DegenerateInput {
            mode,
            required: 3,
            found: locations.len(),
        });
    }
    Ok(())
}

/// Approximate a TSP tour by cheapest insertion.
///
/// Starts from the triangle `0, 1, 2` and inserts the remaining locations in input order,
/// each on the edge where it adds the least length. On ties, the last such edge in the tour wins.
pub fn approximate_tsp_with_insertion(locations: &[Location]) -> Result<Tour> {
    require_cycle(Mode::FastTsp, locations)?;

    let mut order = Vec::with_capacity(locations.len());
    order.extend([0, 1, 2]);

    for k in 3..locations.len() {
        let vertex = &locations[k];
        let mut min_delta = insertion_delta(&locations[order[0]], &locations[order[1]], vertex);
        let mut insert_at = 1;
        for m in 1..order.len() {
            let delta = insertion_delta(
                &locations[order[m]],
                &locations[order[(m + 1) % order.len()]],
                vertex,
            );
            if delta <= min_delta {
                min_delta = delta;
                insert_at = m + 1;
            }
        }
        order.insert(insert_at, k);
    }

    let weight = cycle_weight(&order, |from, to| locations[from].distance(&locations[to]));
    debug!("Insertion tour over {} locations weighs {}", order.len(), weight);
    Ok(Tour { weight, order })
}
