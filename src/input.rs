//! Reading locations from text.
//!
//! The format is a location count followed by that many `x y` integer pairs, all separated by
//! arbitrary whitespace.

use std::io::Read;

use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    geometry::Location,
};

pub fn read_locations<R: Read>(mut reader: R) -> Result<Vec<Location>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_locations(&text)
}

pub fn parse_locations(text: &str) -> Result<Vec<Location>> {
    let mut tokens = text.split_whitespace();
    let count = tokens
        .next()
        .ok_or_else(|| Error::invalid_input("missing location count"))?;
    let count = count
        .parse::<usize>()
        .map_err(|e| Error::invalid_input(format!("bad location count {count:?}: {e}")))?;

    let mut coordinate = |index: usize, axis: &str| -> Result<i32> {
        let token = tokens.next().ok_or_else(|| {
            Error::invalid_input(format!(
                "expected {count} locations, input ends at location {index}"
            ))
        })?;
        token.parse::<i32>().map_err(|e| {
            Error::invalid_input(format!(
                "bad {axis} coordinate {token:?} for location {index}: {e}"
            ))
        })
    };

    let mut locations = Vec::with_capacity(count.min(1 << 16));
    for index in 0..count {
        let x = coordinate(index, "x")?;
        let y = coordinate(index, "y")?;
        locations.push(Location::new(x, y));
    }

    let trailing = tokens.count();
    if trailing > 0 {
        warn!("Ignoring {} tokens after the last location", trailing);
    }

    let distinct = locations
        .iter()
        .map(|location| [location.x, location.y])
        .collect::<HashSet<_>>()
        .len();
    if distinct < locations.len() {
        debug!(
            "{} of {} locations share coordinates with an earlier one",
            locations.len() - distinct,
            locations.len()
        );
    }

    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Zone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_locations() {
        let locations = parse_locations("3\n0 0\n-1 -2\n  5\t-3\n").unwrap();
        assert_eq!(
            locations,
            [Location::new(0, 0), Location::new(-1, -2), Location::new(5, -3)]
        );
        assert_eq!(
            locations.iter().map(Location::zone).collect::<Vec<_>>(),
            [Zone::Border, Zone::Negative, Zone::Positive]
        );
    }

    #[test]
    fn test_read_locations_from_reader() {
        let locations = read_locations("2 1 1 1 1".as_bytes()).unwrap();
        assert_eq!(locations, [Location::new(1, 1); 2]);
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let locations = parse_locations("1\n4 4\n9 9\n").unwrap();
        assert_eq!(locations, [Location::new(4, 4)]);
    }

    #[test]
    fn test_zero_locations() {
        assert!(parse_locations("0\n").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_input() {
        for text in ["", "x", "-1", "2\n0 0\n", "2\n0 0\n1\n", "1\n0 zero\n", "1\n3.5 0\n"] {
            assert!(
                matches!(parse_locations(text), Err(Error::InvalidInput(_))),
                "{text:?}"
            );
        }
    }
}
