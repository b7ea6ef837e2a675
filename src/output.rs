//! Writing solutions as text or JSON.

use std::io::Write;

use clap::ValueEnum;

use crate::{error::Result, Solution};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Total weight with two decimals, then the tree edges or the tour
    #[default]
    Text,
    /// The solution serialized as JSON
    Json,
}

pub fn write_solution<W: Write>(solution: &Solution, format: Format, mut out: W) -> Result<()> {
    match format {
        Format::Text => write_text(solution, &mut out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, solution)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn write_text<W: Write>(solution: &Solution, out: &mut W) -> Result<()> {
    writeln!(out, "{:.2}", solution.weight())?;
    match solution {
        Solution::Tree(tree) => {
            for [from, to] in tree.edges() {
                writeln!(out, "{} {}", from, to)?;
            }
        }
        Solution::Tour(tour) => {
            for vertex in &tour.order {
                write!(out, "{} ", vertex)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpanningTree, Tour};
    use pretty_assertions::assert_eq;

    fn render(solution: &Solution, format: Format) -> String {
        let mut out = vec![];
        write_solution(solution, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tree_as_text() {
        let tree = Solution::Tree(SpanningTree {
            weight: 10.,
            parents: vec![None, Some(2), Some(0)],
        });
        assert_eq!(render(&tree, Format::Text), "10.00\n1 2\n0 2\n");
    }

    #[test]
    fn test_tour_as_text() {
        let tour = Solution::Tour(Tour {
            weight: 2f64.sqrt() * 3.,
            order: vec![0, 2, 1, 3],
        });
        assert_eq!(render(&tour, Format::Text), "4.24\n0 2 1 3 \n");
    }

    #[test]
    fn test_tour_as_json() {
        let tour = Solution::Tour(Tour {
            weight: 4.,
            order: vec![0, 1, 2, 3],
        });
        let json: serde_json::Value =
            serde_json::from_str(&render(&tour, Format::Json)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tour": { "weight": 4.0, "order": [0, 1, 2, 3] } })
        );
    }

    #[test]
    fn test_tree_as_json() {
        let tree = Solution::Tree(SpanningTree {
            weight: 0.,
            parents: vec![None],
        });
        let json: serde_json::Value =
            serde_json::from_str(&render(&tree, Format::Json)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tree": { "weight": 0.0, "parents": [null] } })
        );
    }
}
