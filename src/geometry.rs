//! Locations, zones and distances.

use ndarray::Array2;
use serde::Serialize;

/// Which part of the map a location sits in.
///
/// Edges between [Zone::Negative] and [Zone::Positive] are not allowed when building a spanning tree.
/// [Zone::Border] locations connect to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Both coordinates are negative
    Negative,
    /// On an axis, with no positive coordinate
    Border,
    /// At least one coordinate is positive
    Positive,
}

impl Zone {
    pub fn classify(x: i32, y: i32) -> Self {
        if x < 0 && y < 0 {
            Self::Negative
        } else if x > 0 || y > 0 {
            Self::Positive
        } else {
            Self::Border
        }
    }

    /// Whether an edge may connect locations in these two zones.
    pub fn is_adjacent_to(self, other: Self) -> bool {
        !matches!(
            (self, other),
            (Self::Negative, Self::Positive) | (Self::Positive, Self::Negative)
        )
    }
}

/// Number of locations in each [Zone].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneSummary {
    pub negative: usize,
    pub border: usize,
    pub positive: usize,
}

impl ZoneSummary {
    pub fn from_locations(locations: &[Location]) -> Self {
        locations
            .iter()
            .fold(Self::default(), |mut summary, location| {
                match location.zone() {
                    Zone::Negative => summary.negative += 1,
                    Zone::Border => summary.border += 1,
                    Zone::Positive => summary.positive += 1,
                }
                summary
            })
    }

    /// A spanning tree exists unless both interior zones are populated and nothing on the border joins them.
    pub fn spanning_tree_possible(&self) -> bool {
        !(self.negative > 0 && self.positive > 0 && self.border == 0)
    }
}

/// Weight of an edge under the zone adjacency rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeWeight {
    Connected(f64),
    Forbidden,
}

impl EdgeWeight {
    pub fn connected(self) -> Option<f64> {
        match self {
            Self::Connected(weight) => Some(weight),
            Self::Forbidden => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
    zone: Zone,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            zone: Zone::classify(x, y),
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Euclidean distance, ignoring zones.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = (other.x as i64 - self.x as i64) as f64;
        let dy = (other.y as i64 - self.y as i64) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance, unless the zones of the two locations cannot be connected.
    pub fn restricted_distance(&self, other: &Self) -> EdgeWeight {
        if self.zone.is_adjacent_to(other.zone) {
            EdgeWeight::Connected(self.distance(other))
        } else {
            EdgeWeight::Forbidden
        }
    }
}

impl From<[i32; 2]> for Location {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Change in cycle length from placing `k` on the edge between `i` and `j`.
pub fn insertion_delta(i: &Location, j: &Location, k: &Location) -> f64 {
    i.distance(k) + j.distance(k) - i.distance(j)
}

/// Pairwise unrestricted distances between all locations.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix(Array2<f64>);

impl DistanceMatrix {
    pub fn new(locations: &[Location]) -> Self {
        Self(Array2::from_shape_fn(
            (locations.len(), locations.len()),
            |(i, j)| locations[i].distance(&locations[j]),
        ))
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.0[[from, to]]
    }

    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
